use foundation::{DEFAULT_CENTER, DEFAULT_ZOOM, LatLon};
use protocol::{FeatureCollection, ParkingId};
use runtime::Store;
use tracing::debug;

use crate::markers::{OriginMarker, ParkingMarker, build_markers};
use crate::suppression::MoveSuppression;

/// View the renderer has to apply after new data arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewChange {
    pub center: LatLon,
    pub zoom: f64,
}

/// Map state as the rest of the app sees it.
///
/// The map widget itself (tiles, panning) lives outside; `MapView` decides
/// what it should show and which of its move events are worth reporting.
#[derive(Debug)]
pub struct MapView {
    center: LatLon,
    zoom: f64,
    suppression: MoveSuppression,
    parking: Vec<ParkingMarker>,
    origin: Option<OriginMarker>,
    selection: Store<Option<ParkingId>>,
}

impl MapView {
    pub fn new(selection: Store<Option<ParkingId>>) -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM as f64,
            suppression: MoveSuppression::new(),
            parking: Vec::new(),
            origin: None,
            selection,
        }
    }

    pub fn center(&self) -> LatLon {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn parking_markers(&self) -> &[ParkingMarker] {
        &self.parking
    }

    pub fn origin_marker(&self) -> Option<&OriginMarker> {
        self.origin.as_ref()
    }

    pub fn is_move_suppressed(&self) -> bool {
        self.suppression.is_armed()
    }

    /// Rebuilds markers from `data` and, if its view differs from the current
    /// one, arms move suppression and returns the change to apply.
    pub fn sync_from(&mut self, data: &FeatureCollection) -> Option<ViewChange> {
        let (parking, origin) = build_markers(data);
        self.parking = parking;
        self.origin = origin;

        let center = data.center();
        let zoom = data.zoom();
        if center == self.center && zoom == self.zoom {
            return None;
        }

        self.center = center;
        self.zoom = zoom;
        self.suppression.arm();
        debug!(lat = center.lat, lon = center.lon, zoom, "map view re-centered");
        Some(ViewChange { center, zoom })
    }

    /// Handles the widget's move-end event.
    ///
    /// Returns the new center when the move should be reported upward, i.e.
    /// when it was not caused by [`MapView::sync_from`].
    pub fn on_move_end(&mut self, center: LatLon) -> Option<LatLon> {
        if self.suppression.consume() {
            debug!("move-end after programmatic view change ignored");
            return None;
        }
        self.center = center;
        Some(center)
    }

    /// Tracks zoom changes made by the user; these never trigger a search.
    pub fn on_zoom_end(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Marks `id` as selected. Unknown ids are ignored.
    pub fn select_marker(&self, id: &ParkingId) -> bool {
        if !self.parking.iter().any(|m| &m.id == id) {
            return false;
        }
        self.selection.set(Some(id.clone()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data_at(lat: f64, lon: f64, zoom: f64) -> FeatureCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "properties": {"center": {"lat": lat, "lon": lon}, "zoom": zoom},
            "features": [
                {"id": "p1", "geometry": {"type": "Point", "coordinates": [lon, lat]},
                 "properties": {"markerType": "parking", "distanceMetres": 80}}
            ]
        }))
        .expect("valid collection")
    }

    fn view() -> (MapView, Store<Option<ParkingId>>) {
        let selection = Store::new(None);
        (MapView::new(selection.clone()), selection)
    }

    #[test]
    fn user_pan_is_reported() {
        let (mut map, _) = view();
        let moved = LatLon::new(51.51, -0.13);
        assert_eq!(map.on_move_end(moved), Some(moved));
        assert_eq!(map.center(), moved);
    }

    #[test]
    fn programmatic_change_swallows_exactly_one_move() {
        let (mut map, _) = view();
        let change = map.sync_from(&data_at(51.53, -0.12, 16.0));
        assert_eq!(
            change,
            Some(ViewChange {
                center: LatLon::new(51.53, -0.12),
                zoom: 16.0
            })
        );
        assert!(map.is_move_suppressed());

        assert_eq!(map.on_move_end(LatLon::new(51.53, -0.12)), None);
        let pan = LatLon::new(51.54, -0.12);
        assert_eq!(map.on_move_end(pan), Some(pan));
    }

    #[test]
    fn unchanged_view_does_not_arm() {
        let (mut map, _) = view();
        map.sync_from(&data_at(51.53, -0.12, 16.0));
        map.on_move_end(LatLon::new(51.53, -0.12));

        assert_eq!(map.sync_from(&data_at(51.53, -0.12, 16.0)), None);
        assert!(!map.is_move_suppressed());
        assert_eq!(map.parking_markers().len(), 1);
    }

    #[test]
    fn initial_data_matches_default_view() {
        let (mut map, _) = view();
        assert_eq!(map.sync_from(&FeatureCollection::initial()), None);
        assert!(map.parking_markers().is_empty());
    }

    #[test]
    fn zoom_only_change_is_programmatic() {
        let (mut map, _) = view();
        let change = map.sync_from(&data_at(DEFAULT_CENTER.lat, DEFAULT_CENTER.lon, 17.0));
        assert!(change.is_some());
        assert!(map.is_move_suppressed());
    }

    #[test]
    fn clicking_marker_selects_it() {
        let (mut map, selection) = view();
        map.sync_from(&data_at(51.53, -0.12, 16.0));

        assert!(map.select_marker(&ParkingId::new("p1")));
        assert_eq!(selection.get(), Some(ParkingId::new("p1")));

        assert!(!map.select_marker(&ParkingId::new("nope")));
        assert_eq!(selection.get(), Some(ParkingId::new("p1")));
    }
}
