//! JSON-RPC 2.0 envelope types for the tool-call endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";
pub const TOOLS_CALL: &str = "tools/call";

/// Request correlation id: an integer or a string. Integers above
/// `i64::MAX` land in `Unsigned`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    Unsigned(u64),
    String(String),
}

impl RequestId {
    /// Recover an id from an arbitrary JSON value, if it has a valid shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// A `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    pub params: ToolCallParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

/// Machine-readable error classification plus free-form details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    #[serde(rename = "type")]
    pub kind: String,
    pub details: Value,
}

/// Error codes used by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    SteamApiError,
    NetworkError,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::SteamApiError => -32000,
            Self::NetworkError => -32001,
        }
    }

    /// HTTP status sent alongside an error with this code.
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::ParseError | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::MethodNotFound => StatusCode::NOT_FOUND,
            Self::InvalidParams => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError | Self::SteamApiError | Self::NetworkError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(
        id: Option<RequestId>,
        code: ErrorCode,
        message: impl Into<String>,
        data: Option<ErrorData>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: code.code(),
                message: message.into(),
                data,
            }),
        }
    }
}

/// A response envelope paired with its HTTP status.
#[derive(Debug, Clone)]
pub struct RpcReply {
    pub status: StatusCode,
    pub body: JsonRpcResponse,
}

impl RpcReply {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: JsonRpcResponse::success(id, result),
        }
    }

    /// Error reply whose `data.details` is given explicitly.
    pub fn error_with_details(
        id: Option<RequestId>,
        code: ErrorCode,
        message: impl Into<String>,
        kind: &str,
        details: Value,
    ) -> Self {
        Self {
            status: code.http_status(),
            body: JsonRpcResponse::error(
                id,
                code,
                message,
                Some(ErrorData {
                    kind: kind.to_string(),
                    details,
                }),
            ),
        }
    }

    /// Error reply whose `data.details` repeats the message.
    pub fn error(
        id: Option<RequestId>,
        code: ErrorCode,
        message: impl Into<String>,
        kind: &str,
    ) -> Self {
        let message = message.into();
        let details = Value::String(message.clone());
        Self::error_with_details(id, code, message, kind, details)
    }

    /// Error code carried by this reply, if it is an error.
    pub fn error_code(&self) -> Option<i32> {
        self.body.error.as_ref().map(|e| e.code)
    }
}

impl IntoResponse for RpcReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
