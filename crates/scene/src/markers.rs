use foundation::{LatLon, format_distance_opt};
use protocol::{FeatureCollection, ParkingId};

pub const ORIGIN_FALLBACK_LABEL: &str = "Search origin";

/// Clickable marker for one parking location.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingMarker {
    pub id: ParkingId,
    pub position: LatLon,
    pub distance_label: Option<String>,
}

impl ParkingMarker {
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = vec!["Bike parking".to_string()];
        if let Some(d) = &self.distance_label {
            lines.push(format!("Distance: {d}"));
        }
        lines.push("Click for details".to_string());
        lines
    }
}

/// Highlighted circle where the search was anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginMarker {
    pub position: LatLon,
    pub label: String,
}

/// Derives the drawable markers from a search result.
///
/// Parking features without an id or a point geometry are skipped since they
/// can be neither placed nor selected. Only the first origin feature is used.
pub fn build_markers(data: &FeatureCollection) -> (Vec<ParkingMarker>, Option<OriginMarker>) {
    let parking = data
        .parking_features()
        .filter_map(|f| {
            Some(ParkingMarker {
                id: f.parking_id()?.clone(),
                position: f.position()?,
                distance_label: format_distance_opt(f.properties.distance_metres),
            })
        })
        .collect();

    let origin = data.origin_feature().and_then(|f| {
        Some(OriginMarker {
            position: f.position()?,
            label: f
                .properties
                .label
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| ORIGIN_FALLBACK_LABEL.to_string()),
        })
    });

    (parking, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn collection(features: serde_json::Value) -> FeatureCollection {
        serde_json::from_value(json!({"type": "FeatureCollection", "features": features}))
            .expect("valid collection")
    }

    #[test]
    fn parking_tooltip_has_distance_when_known() {
        let fc = collection(json!([
            {"id": "a", "geometry": {"type": "Point", "coordinates": [-0.1, 51.5]},
             "properties": {"markerType": "parking", "distanceMetres": 1234.0}},
            {"id": "b", "geometry": {"type": "Point", "coordinates": [-0.2, 51.6]},
             "properties": {"markerType": "parking"}}
        ]));
        let (markers, origin) = build_markers(&fc);
        assert_eq!(origin, None);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].position, LatLon::new(51.5, -0.1));
        assert_eq!(
            markers[0].tooltip_lines(),
            vec!["Bike parking", "Distance: 1.2 km", "Click for details"]
        );
        assert_eq!(
            markers[1].tooltip_lines(),
            vec!["Bike parking", "Click for details"]
        );
    }

    #[test]
    fn features_without_id_or_point_are_skipped() {
        let fc = collection(json!([
            {"geometry": {"type": "Point", "coordinates": [-0.1, 51.5]},
             "properties": {"markerType": "parking"}},
            {"id": "c", "properties": {"markerType": "parking"}}
        ]));
        let (markers, _) = build_markers(&fc);
        assert!(markers.is_empty());
    }

    #[test]
    fn only_first_origin_is_drawn() {
        let fc = collection(json!([
            {"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
             "properties": {"markerType": "origin"}},
            {"geometry": {"type": "Point", "coordinates": [3.0, 4.0]},
             "properties": {"markerType": "origin", "label": "Second"}}
        ]));
        let (_, origin) = build_markers(&fc);
        assert_eq!(
            origin,
            Some(OriginMarker {
                position: LatLon::new(2.0, 1.0),
                label: ORIGIN_FALLBACK_LABEL.to_string(),
            })
        );
    }
}
