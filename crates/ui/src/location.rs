/// Why the platform could not give us a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    Unavailable,
    Timeout,
    /// No geolocation API at all.
    Unsupported,
}

impl LocationError {
    /// Maps a W3C `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::Unavailable,
            3 => LocationError::Timeout,
            _ => LocationError::Unavailable,
        }
    }
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "location permission denied"),
            LocationError::Unavailable => write!(f, "location unavailable"),
            LocationError::Timeout => write!(f, "location request timed out"),
            LocationError::Unsupported => write!(f, "geolocation not supported"),
        }
    }
}

impl std::error::Error for LocationError {}
