use gloo_net::http::Request;
use protocol::ApiError;

use crate::transport::{HttpResponse, LocalBoxFuture, Transport};

/// Browser transport using `fetch` through gloo-net.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    fn get(&self, url: String) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>> {
        Box::pin(async move {
            let resp = Request::get(&url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let status_text = resp.status_text();
            let body = resp
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(HttpResponse {
                status,
                status_text,
                body,
            })
        })
    }
}
