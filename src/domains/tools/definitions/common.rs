//! Helpers shared across Steam tool handlers.
//!
//! Steam silently omits empty collections and sometimes returns a payload
//! without the object a method is supposed to produce. These helpers turn
//! the first case into empty lists and the second into application errors.

use serde_json::{Map, Value};

use crate::domains::steam::{Payload, SteamApiError};
use crate::domains::tools::error::{ToolError, ToolResult};

/// Application error for a payload lacking an expected object.
pub fn missing_object(message: impl Into<String>, details: &str) -> ToolError {
    SteamApiError::application(message).with_details(details).into()
}

/// Whether `payload[outer]` is an object containing `inner`.
pub fn has_nested(payload: &Payload, outer: &str, inner: &str) -> bool {
    payload
        .get(outer)
        .and_then(Value::as_object)
        .is_some_and(|object| object.contains_key(inner))
}

/// Mutable access to the object stored at `key`.
pub fn object_mut<'a>(payload: &'a mut Payload, key: &str) -> ToolResult<&'a mut Map<String, Value>> {
    payload
        .get_mut(key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ToolError::internal(format!("'{}' in Steam payload is not an object", key)))
}

/// Insert `[]` under `key` if Steam left it out.
pub fn default_to_empty_list(object: &mut Map<String, Value>, key: &str) {
    object
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()));
}
