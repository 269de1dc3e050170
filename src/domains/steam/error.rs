//! Steam API error types.
//!
//! Only these two kinds cross the upstream client boundary. Anything else
//! that goes wrong while talking to Steam is a bug and is reported as an
//! internal error further up.

use serde_json::Value;
use thiserror::Error;

/// Result type for Steam API operations.
pub type SteamResult<T> = Result<T, SteamApiError>;

/// Errors returned by the Steam API client.
#[derive(Debug, Clone, Error)]
pub enum SteamApiError {
    /// Steam answered, but the answer is a logical failure (bad identifier,
    /// empty payload, non-success result code, private profile, ...).
    #[error("{message}")]
    Application {
        message: String,
        status_code: Option<u16>,
        details: Option<Value>,
    },

    /// The call never produced an interpretable response.
    #[error("{message}")]
    Network {
        message: String,
        details: Option<Value>,
    },
}

impl SteamApiError {
    /// Create an application error without status or details.
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
            status_code: None,
            details: None,
        }
    }

    /// Create a network error carrying the underlying cause.
    pub fn network(message: impl Into<String>, details: impl Into<Value>) -> Self {
        Self::Network {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Attach an HTTP status code (application errors only).
    pub fn with_status(mut self, status: u16) -> Self {
        if let Self::Application { status_code, .. } = &mut self {
            *status_code = Some(status);
        }
        self
    }

    /// Attach structured details.
    pub fn with_details(mut self, value: impl Into<Value>) -> Self {
        match &mut self {
            Self::Application { details, .. } | Self::Network { details, .. } => {
                *details = Some(value.into());
            }
        }
        self
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::Application { message, .. } | Self::Network { message, .. } => message,
        }
    }

    /// Upstream HTTP status, when Steam provided one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Application { status_code, .. } => *status_code,
            Self::Network { .. } => None,
        }
    }

    /// Structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Application { details, .. } | Self::Network { details, .. } => details.as_ref(),
        }
    }

    /// Details rendered as plain text, for signature matching.
    pub fn details_text(&self) -> Option<String> {
        self.details().map(|d| match d {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
