//! Runs requests issued by the state machines against an [`ApiClient`].
//!
//! Borrows of the state machines are never held across an `.await`, so the
//! frontends can keep reacting to input while a request is pending.

use std::cell::RefCell;

use client::{ApiClient, Transport};
use tracing::debug;

use crate::details::{DetailsPanel, DetailsTicket, Resolution};
use crate::search::{SearchHeader, SearchRequest};

/// Performs `request` and hands the outcome back to `header`.
///
/// Returns whether the outcome was applied.
pub async fn run_search<T: Transport>(
    header: &RefCell<SearchHeader>,
    client: &ApiClient<T>,
    request: SearchRequest,
) -> bool {
    let result = match &request {
        SearchRequest::Query(query) => client.search_by_query(query).await,
        SearchRequest::Coordinates(at) => client.search_by_coordinates(at.lat, at.lon).await,
    };
    header.borrow_mut().complete(&request, result)
}

/// Fetches the details `ticket` asks for and resolves it on `panel`.
pub async fn load_details<T: Transport>(
    panel: &RefCell<DetailsPanel>,
    client: &ApiClient<T>,
    ticket: DetailsTicket,
) -> Resolution {
    let result = client.fetch_details(&ticket.id).await;
    let resolution = panel.borrow_mut().resolve(&ticket, result);
    debug!(id = %ticket.id, ?resolution, "details resolved");
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AppContext;
    use crate::details::DETAILS_ERROR_TITLE;
    use client::ScriptedTransport;
    use foundation::LatLon;
    use pretty_assertions::assert_eq;
    use protocol::{FeatureCollection, ParkingId};
    use serde_json::json;

    const BASE: &str = "http://127.0.0.1:5000";

    fn collection() -> serde_json::Value {
        json!({
            "type": "FeatureCollection",
            "properties": {"center": {"lat": 51.5308, "lon": -0.1238}, "zoom": 16, "resultCount": 2},
            "features": [
                {"id": "RWG1", "geometry": {"type": "Point", "coordinates": [-0.1238, 51.5308]},
                 "properties": {"markerType": "parking", "distanceMetres": 40}},
                {"id": "RWG2", "geometry": {"type": "Point", "coordinates": [-0.1241, 51.5311]},
                 "properties": {"markerType": "parking", "distanceMetres": 1250}}
            ]
        })
    }

    #[test]
    fn query_search_replaces_map_data() {
        let ctx = AppContext::new();
        ctx.selection.set(Some(ParkingId::new("old")));
        let header = RefCell::new(SearchHeader::new(ctx.clone()));
        let transport = ScriptedTransport::new();
        transport.push_json(200, collection());
        let client = ApiClient::new(BASE, &transport);

        let request = header.borrow_mut().submit_query("Kings Cross").expect("issued");
        assert!(pollster::block_on(run_search(&header, &client, request)));

        assert_eq!(
            transport.requests(),
            vec![format!(
                "{BASE}/api/v1.0/parking/search?query=Kings%20Cross%2C%20London%2C%20UK"
            )]
        );
        assert_eq!(ctx.map_data.with(FeatureCollection::result_count), 2);
        assert_eq!(ctx.selection.get(), None);
        assert!(!ctx.loading.get());
        assert!(header.borrow().is_idle());
    }

    #[test]
    fn coordinates_search_failure_opens_modal() {
        let ctx = AppContext::new();
        let header = RefCell::new(SearchHeader::new(ctx.clone()));
        let transport = ScriptedTransport::new();
        transport.push_json(404, json!({"error": "No parking near 51.6,-0.2"}));
        let client = ApiClient::new(BASE, &transport);

        let request = header
            .borrow_mut()
            .submit_coordinates(LatLon::new(51.6, -0.2))
            .expect("issued");
        assert!(pollster::block_on(run_search(&header, &client, request)));

        let modal = ctx.modal.get();
        assert!(modal.show);
        assert_eq!(modal.body_text(), "No parking near 51.6,-0.2");
        assert_eq!(ctx.map_data.get(), FeatureCollection::initial());
    }

    #[test]
    fn details_success_and_error_payload() {
        let ctx = AppContext::new();
        let panel = RefCell::new(DetailsPanel::new(ctx.clone()));
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"Bike capacity": 10, "Under cover": "TRUE"}));
        transport.push_json(200, json!({"error": "not found"}));
        let client = ApiClient::new(BASE, &transport);

        let ticket = panel
            .borrow_mut()
            .on_selection_changed(Some(ParkingId::new("RWG1")))
            .expect("ticket");
        assert_eq!(
            pollster::block_on(load_details(&panel, &client, ticket)),
            Resolution::Shown
        );
        assert!(panel.borrow().is_visible());

        ctx.selection.set(Some(ParkingId::new("42")));
        let ticket = panel
            .borrow_mut()
            .on_selection_changed(Some(ParkingId::new("42")))
            .expect("ticket");
        assert_eq!(
            pollster::block_on(load_details(&panel, &client, ticket)),
            Resolution::Failed
        );
        assert_eq!(ctx.modal.get().title, DETAILS_ERROR_TITLE);
        assert_eq!(ctx.selection.get(), None);
        assert!(!panel.borrow().is_visible());
        assert_eq!(
            transport.requests()[1],
            format!("{BASE}/api/v1.0/parking/details/42")
        );
    }

    #[test]
    fn superseded_details_fetch_is_dropped() {
        let ctx = AppContext::new();
        let panel = RefCell::new(DetailsPanel::new(ctx.clone()));
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"Stand type": "Sheffield stand"}));
        let client = ApiClient::new(BASE, &transport);

        let first = panel
            .borrow_mut()
            .on_selection_changed(Some(ParkingId::new("A")))
            .expect("ticket");
        panel
            .borrow_mut()
            .on_selection_changed(Some(ParkingId::new("B")))
            .expect("ticket");

        assert_eq!(
            pollster::block_on(load_details(&panel, &client, first)),
            Resolution::Stale
        );
        assert!(!panel.borrow().is_visible());
        assert!(ctx.loading.get());
    }
}
