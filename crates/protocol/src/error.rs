use serde::{Deserialize, Serialize};

/// Message used when neither the payload nor the HTTP status says anything.
pub const GENERIC_FAILURE: &str = "Request failed";

/// `{"error": "..."}` body the API answers with on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// Extracts a non-empty `error` string from an arbitrary JSON payload.
pub fn payload_error(payload: &serde_json::Value) -> Option<String> {
    payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Every way a call to the parking API can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    Transport(String),
    /// Non-2xx status. `reason` is the HTTP status text (or a generic
    /// fallback), `message` the payload's `error` field when there was one.
    Status {
        status: u16,
        reason: String,
        message: Option<String>,
    },
    /// 2xx response carrying an `error` field.
    Application(String),
    /// 2xx response whose body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// Message suitable for showing to a user, when the server supplied one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Application(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "network error: {msg}"),
            ApiError::Status {
                status,
                reason,
                message,
            } => write!(f, "HTTP {status}: {}", message.as_deref().unwrap_or(reason)),
            ApiError::Application(msg) => f.write_str(msg),
            ApiError::Decode(msg) => write!(f, "unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
