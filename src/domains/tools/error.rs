//! Tool-specific error types.

use serde::Serialize;
use thiserror::Error;

use crate::domains::steam::SteamApiError;

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Two definitions were registered under the same name.
    #[error("Duplicate tool name: {0}")]
    Duplicate(String),

    /// Arguments did not satisfy the tool's schema.
    #[error("Invalid arguments: {} field error(s)", .0.len())]
    InvalidArguments(Vec<FieldError>),

    /// The Steam API call failed.
    #[error(transparent)]
    Upstream(#[from] SteamApiError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// A single argument validation failure.
///
/// Serialized as `{"loc": [...], "msg": "...", "type": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(field: &str, kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// Error for an element inside a list field.
    pub fn at_index(field: &str, index: usize, kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![field.to_string(), index.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, "missing", "Field required")
    }

    /// Name of the top-level field this error refers to.
    pub fn field(&self) -> &str {
        self.loc.first().map(String::as_str).unwrap_or_default()
    }
}
