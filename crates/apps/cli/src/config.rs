use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const BASE_URL_VAR: &str = "PARKING_API_BASE";
pub const TIMEOUT_VAR: &str = "PARKING_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidTimeout(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTimeout(raw) => {
                write!(f, "invalid {TIMEOUT_VAR}: {raw:?} (expected whole seconds)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Flags win over the environment, the environment over defaults.
    pub fn resolve(
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        Self::resolve_with(base_url, timeout_secs, |key| env::var(key).ok())
    }

    pub fn resolve_with(
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url
            .or_else(|| lookup(BASE_URL_VAR))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match timeout_secs {
            Some(secs) => secs,
            None => match lookup(TIMEOUT_VAR) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw))?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
