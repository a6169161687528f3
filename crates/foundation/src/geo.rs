/// Degrees of latitude/longitude per meter, treating a degree as a fixed
/// ground length everywhere on the globe.
pub const DEGREES_PER_METER: f64 = 0.000_008_988_122_901;

/// Distance a map center must move before a new area search is offered.
pub const SEARCH_AREA_THRESHOLD_M: f64 = 50.0;

/// Initial map view: central London.
pub const DEFAULT_CENTER: LatLon = LatLon {
    lat: 51.5074,
    lon: -0.1278,
};
pub const DEFAULT_ZOOM: u8 = 13;

/// WGS84 position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a position from a GeoJSON `[lon, lat]` pair.
    pub fn from_lon_lat(coords: [f64; 2]) -> Self {
        Self::new(coords[1], coords[0])
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Euclidean distance between two positions measured directly on degrees.
///
/// Longitude degrees shrink towards the poles, so this overestimates east-west
/// separation away from the equator. Good enough to decide whether the user
/// panned "a bit" at city scale.
pub fn planar_distance_deg(a: LatLon, b: LatLon) -> f64 {
    let dlat = a.lat - b.lat;
    let dlon = a.lon - b.lon;
    (dlat * dlat + dlon * dlon).sqrt()
}

pub fn meters_to_degrees(meters: f64) -> f64 {
    meters * DEGREES_PER_METER
}

/// True when `b` lies further than `threshold_m` from `a` under the planar
/// approximation.
pub fn moved_beyond(a: LatLon, b: LatLon, threshold_m: f64) -> bool {
    planar_distance_deg(a, b) > meters_to_degrees(threshold_m)
}
