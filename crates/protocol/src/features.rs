use foundation::{DEFAULT_CENTER, DEFAULT_ZOOM, LatLon};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a bike parking location.
///
/// The API is not consistent about ids being strings or numbers, so both are
/// accepted and normalized to text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ParkingId(pub String);

impl ParkingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParkingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ParkingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => ParkingId(s),
            Repr::Int(n) => ParkingId(n.to_string()),
            Repr::Float(n) => ParkingId(n.to_string()),
        })
    }
}

/// Marker kind carried in each feature's `markerType` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Parking,
    Origin,
    /// Anything the map does not know how to draw.
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl From<Center> for LatLon {
    fn from(c: Center) -> Self {
        LatLon::new(c.lat, c.lon)
    }
}

impl From<LatLon> for Center {
    fn from(p: LatLon) -> Self {
        Center {
            lat: p.lat,
            lon: p.lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionProperties {
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub zoom: Option<f64>,
    #[serde(default)]
    pub result_count: Option<u64>,
    #[serde(default)]
    pub query: Option<String>,
    /// Geocoded search origin; the shape is owned by the server.
    #[serde(default)]
    pub origin: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    /// GeoJSON order: `[lon, lat]`.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProperties {
    #[serde(default)]
    pub marker_type: MarkerKind,
    #[serde(default)]
    pub id: Option<ParkingId>,
    #[serde(default)]
    pub distance_metres: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: Option<ParkingId>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: FeatureProperties,
}

impl Feature {
    pub fn marker_kind(&self) -> MarkerKind {
        self.properties.marker_type
    }

    /// Parking id from the properties, falling back to the feature id.
    pub fn parking_id(&self) -> Option<&ParkingId> {
        self.properties.id.as_ref().or(self.id.as_ref())
    }

    /// Point position, if the geometry is a well-formed point.
    pub fn position(&self) -> Option<LatLon> {
        let geometry = self.geometry.as_ref()?;
        if !geometry.kind.eq_ignore_ascii_case("point") || geometry.coordinates.len() < 2 {
            return None;
        }
        let p = LatLon::from_lon_lat([geometry.coordinates[0], geometry.coordinates[1]]);
        p.is_finite().then_some(p)
    }
}

/// Search result as returned by the API.
///
/// Replaced wholesale on every successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_kind")]
    pub kind: String,
    #[serde(default)]
    pub properties: CollectionProperties,
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn feature_collection_kind() -> String {
    "FeatureCollection".to_string()
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::initial()
    }
}

impl FeatureCollection {
    /// Empty collection shown before the first search.
    pub fn initial() -> Self {
        Self {
            kind: feature_collection_kind(),
            properties: CollectionProperties {
                center: Some(DEFAULT_CENTER.into()),
                zoom: Some(DEFAULT_ZOOM as f64),
                result_count: Some(0),
                query: None,
                origin: None,
            },
            features: Vec::new(),
        }
    }

    /// View center, or the default when missing or not finite.
    pub fn center(&self) -> LatLon {
        self.properties
            .center
            .map(LatLon::from)
            .filter(LatLon::is_finite)
            .unwrap_or(DEFAULT_CENTER)
    }

    /// View zoom, or the default when missing or zero.
    pub fn zoom(&self) -> f64 {
        self.properties
            .zoom
            .filter(|z| z.is_finite() && *z > 0.0)
            .unwrap_or(DEFAULT_ZOOM as f64)
    }

    pub fn parking_features(&self) -> impl Iterator<Item = &Feature> {
        self.features
            .iter()
            .filter(|f| f.marker_kind() == MarkerKind::Parking)
    }

    pub fn origin_feature(&self) -> Option<&Feature> {
        self.features
            .iter()
            .find(|f| f.marker_kind() == MarkerKind::Origin)
    }

    pub fn result_count(&self) -> u64 {
        self.properties
            .result_count
            .unwrap_or_else(|| self.parking_features().count() as u64)
    }
}
