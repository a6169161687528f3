use protocol::{
    ApiError, FeatureCollection, GENERIC_FAILURE, ParkingDetails, ParkingId, details_url,
    normalize_base_url, payload_error, search_coordinates_url, search_query_url,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::transport::{HttpResponse, Transport};

/// Client for the three parking endpoints.
///
/// One attempt per call, no retries: failures surface to the caller as soon
/// as they happen.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// `base_url` may be empty (same-origin) and may end with a slash.
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn search_by_query(&self, query: &str) -> Result<FeatureCollection, ApiError> {
        self.get_json(search_query_url(&self.base_url, query)).await
    }

    pub async fn search_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<FeatureCollection, ApiError> {
        self.get_json(search_coordinates_url(&self.base_url, lat, lon))
            .await
    }

    pub async fn fetch_details(&self, id: &ParkingId) -> Result<ParkingDetails, ApiError> {
        self.get_json(details_url(&self.base_url, id)).await
    }

    async fn get_json<R: DeserializeOwned>(&self, url: String) -> Result<R, ApiError> {
        debug!(%url, "GET");
        let result = match self.transport.get(url.clone()).await {
            Ok(resp) => decode_response(resp),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            warn!(%url, "request failed: {err}");
        }
        result
    }
}

/// Turns a raw response into a typed value or a normalized error.
///
/// - non-2xx: `Status`, carrying the payload's `error` field if any
/// - 2xx with an `error` field: `Application`
/// - 2xx with a body of the wrong shape: `Decode`
pub fn decode_response<R: DeserializeOwned>(resp: HttpResponse) -> Result<R, ApiError> {
    let payload: Option<serde_json::Value> = serde_json::from_str(&resp.body).ok();

    if !resp.is_success() {
        let reason = resp.status_text.trim();
        return Err(ApiError::Status {
            status: resp.status,
            reason: if reason.is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                reason.to_string()
            },
            message: payload.as_ref().and_then(payload_error),
        });
    }

    let payload = payload.ok_or_else(|| ApiError::Decode("body is not JSON".to_string()))?;
    if let Some(message) = payload_error(&payload) {
        return Err(ApiError::Application(message));
    }
    serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, decode_response};
    use crate::scripted::ScriptedTransport;
    use crate::transport::HttpResponse;
    use pretty_assertions::assert_eq;
    use protocol::{ApiError, FeatureCollection, ParkingDetails, ParkingId};
    use serde_json::json;

    fn client(transport: &ScriptedTransport) -> ApiClient<&ScriptedTransport> {
        ApiClient::new("https://parking.example.org/", transport)
    }

    #[test]
    fn search_by_query_hits_search_endpoint() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            json!({"type": "FeatureCollection", "features": []}),
        );

        let fc = pollster::block_on(client(&transport).search_by_query("Kings Cross, London, UK"))
            .expect("search");
        assert!(fc.features.is_empty());
        assert_eq!(
            transport.requests(),
            vec![
                "https://parking.example.org/api/v1.0/parking/search?query=Kings%20Cross%2C%20London%2C%20UK"
                    .to_string()
            ]
        );
    }

    #[test]
    fn search_by_coordinates_sends_lat_lon() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"features": []}));

        pollster::block_on(client(&transport).search_by_coordinates(51.53, -0.12))
            .expect("search");
        assert_eq!(
            transport.requests(),
            vec![
                "https://parking.example.org/api/v1.0/parking/search?lat=51.53&lon=-0.12"
                    .to_string()
            ]
        );
    }

    #[test]
    fn details_error_field_is_an_error() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"error": "not found"}));

        let err = pollster::block_on(client(&transport).fetch_details(&ParkingId::new("42")))
            .expect_err("error payload");
        assert_eq!(err, ApiError::Application("not found".to_string()));
        assert_eq!(
            transport.requests(),
            vec!["https://parking.example.org/api/v1.0/parking/details/42".to_string()]
        );
    }

    #[test]
    fn transport_failure_is_surfaced_once() {
        let transport = ScriptedTransport::new();
        transport.push_failure(ApiError::Transport("connection refused".into()));

        let err = pollster::block_on(client(&transport).search_by_query("x"))
            .expect_err("transport failure");
        assert_eq!(err, ApiError::Transport("connection refused".into()));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn non_success_status_uses_payload_message() {
        let err = decode_response::<FeatureCollection>(HttpResponse::new(
            404,
            "Not Found",
            r#"{"error": "Not found"}"#,
        ))
        .expect_err("404");
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                reason: "Not Found".into(),
                message: Some("Not found".into()),
            }
        );
    }

    #[test]
    fn non_success_status_without_body_falls_back() {
        let err = decode_response::<FeatureCollection>(HttpResponse::new(500, "", "<html>"))
            .expect_err("500");
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                reason: "Request failed".into(),
                message: None,
            }
        );
    }

    #[test]
    fn non_success_status_ignores_well_formed_body() {
        let err = decode_response::<FeatureCollection>(HttpResponse::new(
            503,
            "Service Unavailable",
            r#"{"type": "FeatureCollection", "features": []}"#,
        ))
        .expect_err("503");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn success_with_garbage_is_decode_error() {
        let err = decode_response::<ParkingDetails>(HttpResponse::new(200, "OK", "nope"))
            .expect_err("garbage");
        assert!(matches!(err, ApiError::Decode(_)));

        let err = decode_response::<FeatureCollection>(HttpResponse::new(
            200,
            "OK",
            r#"{"features": 3}"#,
        ))
        .expect_err("wrong shape");
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
