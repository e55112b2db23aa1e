use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no authentication token found; run `ff auth login`")]
    NotAuthenticated,

    #[error("session expired or rejected (401){}", detail(.message.as_deref()))]
    Unauthorized { message: Option<String> },

    #[error("{endpoint}: HTTP {status}{}", detail(.message.as_deref()))]
    Status {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },

    #[error("{endpoint}: request timed out after {}ms", .timeout.as_millis())]
    Timeout { endpoint: String, timeout: Duration },

    #[error("{endpoint}: {reason}")]
    Network { endpoint: String, reason: String },

    #[error("{endpoint}: unexpected response body: {reason}")]
    Malformed { endpoint: String, reason: String },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Auth(#[from] ff_auth::AuthError),
}

fn detail(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl ClientError {
    /// Text suitable for showing to the user.
    ///
    /// Server-provided messages win. HTTP failures without one use
    /// `fallback`; transport failures describe themselves.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            }
            | Self::Unauthorized {
                message: Some(message),
            } => message.clone(),
            Self::Status { message: None, .. } | Self::Unauthorized { message: None } => {
                fallback.to_string()
            }
            other => other.to_string(),
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NotAuthenticated)
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, then `error`, then `msg`. Array values yield their
/// first string element.
#[must_use]
pub fn server_message(body: &serde_json::Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|value| match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .first()
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            _ => None,
        })
}
