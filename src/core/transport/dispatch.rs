//! JSON-RPC request dispatcher.
//!
//! Takes a raw request body through parse → structure check → typed decode →
//! tool call and turns every outcome, including a panicking handler, into a
//! well-formed envelope with a matching HTTP status.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde_json::{Value, json};
use tracing::{error, warn};

use super::jsonrpc::{ErrorCode, JSONRPC_VERSION, RequestId, RpcReply, TOOLS_CALL, ToolCallRequest};
use crate::core::McpServer;
use crate::domains::steam::SteamApiError;
use crate::domains::tools::ToolError;

const PARSE_ERROR_MESSAGE: &str = "Failed to parse JSON request body.";
const INVALID_STRUCTURE_MESSAGE: &str = "Invalid JSON-RPC request structure.";
const INTERNAL_ERROR_MESSAGE: &str = "An unexpected internal server error occurred.";

/// Handle one raw request body.
pub async fn dispatch(server: &McpServer, body: &[u8]) -> RpcReply {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse request body: {}", e);
            return RpcReply::error(None, ErrorCode::ParseError, PARSE_ERROR_MESSAGE, "ParseError");
        }
    };

    let raw_id = value.get("id").and_then(RequestId::from_value);

    if !has_envelope_shape(&value) {
        warn!("Invalid Request Structure: {}", INVALID_STRUCTURE_MESSAGE);
        return RpcReply::error(
            raw_id,
            ErrorCode::InvalidRequest,
            INVALID_STRUCTURE_MESSAGE,
            "InvalidRequest",
        );
    }

    let request: ToolCallRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            warn!("Invalid Request Structure: {}", e);
            return RpcReply::error(raw_id, ErrorCode::InvalidRequest, e.to_string(), "InvalidRequest");
        }
    };

    let id = request.id;
    if request.method != TOOLS_CALL {
        return RpcReply::error(
            Some(id),
            ErrorCode::MethodNotFound,
            format!("Unsupported method: {}", request.method),
            "MethodNotFound",
        );
    }

    let name = request.params.name;
    let outcome = AssertUnwindSafe(server.call_tool(&name, &request.params.arguments))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(payload)) => RpcReply::success(id, Value::Object(payload)),
        Ok(Err(e)) => tool_error_reply(id, &name, e),
        Err(panic) => {
            error!(
                "Tool '{}' panicked: {}",
                name,
                panic_message(panic.as_ref())
            );
            internal_error(id)
        }
    }
}

fn has_envelope_shape(value: &Value) -> bool {
    value.as_object().is_some_and(|object| {
        object.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION)
            && object.contains_key("method")
            && object.contains_key("params")
    })
}

/// Map a tool failure onto the error taxonomy.
fn tool_error_reply(id: RequestId, name: &str, error: ToolError) -> RpcReply {
    match error {
        ToolError::NotFound(_) => RpcReply::error(
            Some(id),
            ErrorCode::MethodNotFound,
            format!("Tool '{}' not found.", name),
            "ToolNotFound",
        ),
        ToolError::InvalidArguments(errors) => RpcReply::error_with_details(
            Some(id),
            ErrorCode::InvalidParams,
            format!("Invalid parameters for tool '{}'.", name),
            "ValidationError",
            json!(errors),
        ),
        ToolError::Upstream(SteamApiError::Application {
            message,
            status_code,
            details,
        }) => {
            error!("Steam API Error during tool '{}': {}", name, message);
            RpcReply::error_with_details(
                Some(id),
                ErrorCode::SteamApiError,
                format!("Steam API Error: {}", message),
                "SteamApiError",
                json!({"status_code": status_code, "details": details}),
            )
        }
        ToolError::Upstream(SteamApiError::Network { message, details }) => {
            error!("Network Error during tool '{}': {}", name, message);
            RpcReply::error_with_details(
                Some(id),
                ErrorCode::NetworkError,
                format!("Network Error: {}", message),
                "NetworkError",
                json!({"details": details}),
            )
        }
        other @ (ToolError::Duplicate(_) | ToolError::Internal(_)) => {
            error!("Unhandled error in tool '{}': {}", name, other);
            internal_error(id)
        }
    }
}

fn internal_error(id: RequestId) -> RpcReply {
    RpcReply::error(
        Some(id),
        ErrorCode::InternalError,
        INTERNAL_ERROR_MESSAGE,
        "InternalServerError",
    )
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::steam::{ApiRequest, Payload, SteamApi, SteamResult};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::{Arc, Mutex};

    /// Steam stub returning a fixed result and recording requests.
    struct Stub {
        result: SteamResult<Payload>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl SteamApi for Stub {
        async fn call(&self, request: ApiRequest) -> SteamResult<Payload> {
            self.requests.lock().unwrap().push(request);
            self.result.clone()
        }
    }

    struct PanickingSteam;

    #[async_trait]
    impl SteamApi for PanickingSteam {
        async fn call(&self, _request: ApiRequest) -> SteamResult<Payload> {
            panic!("stub exploded");
        }
    }

    fn server_with(result: SteamResult<Payload>) -> (McpServer, Arc<Stub>) {
        let stub = Arc::new(Stub {
            result,
            requests: Mutex::new(Vec::new()),
        });
        let server = McpServer::with_client(Config::for_api_key("k"), stub.clone()).unwrap();
        (server, stub)
    }

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    fn call(name: &str, arguments: Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "jsonrpc": "2.0",
            "id": 11,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        }))
        .unwrap()
    }

    fn body_of(reply: &RpcReply) -> Value {
        serde_json::to_value(&reply.body).unwrap()
    }

    #[tokio::test]
    async fn test_success_echoes_id_and_result() {
        let upstream = json!({"response": {"player_count": 1234, "result": 1}});
        let (server, _) = server_with(Ok(payload(upstream.clone())));

        let reply = dispatch(&server, &call("getCurrentPlayers", json!({"appid": 570}))).await;

        assert_eq!(reply.status, StatusCode::OK);
        let body = body_of(&reply);
        assert_eq!(body["id"], 11);
        assert_eq!(body["result"], upstream);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_string_id_preserved() {
        let (server, _) = server_with(Ok(payload(json!({"response": {"result": 1}}))));
        let body = serde_json::to_vec(&json!({
            "jsonrpc": "2.0", "id": "req-1", "method": "tools/call",
            "params": {"name": "getCurrentPlayers", "arguments": {"appid": 1}}
        }))
        .unwrap();

        let reply = dispatch(&server, &body).await;
        assert_eq!(body_of(&reply)["id"], "req-1");
    }

    #[tokio::test]
    async fn test_parse_error_has_no_id() {
        let (server, _) = server_with(Ok(Payload::new()));
        let reply = dispatch(&server, b"{\"jsonrpc\": \"2.0\", \"id\": 5,").await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32700);
        assert_eq!(body["error"]["message"], "Failed to parse JSON request body.");
        assert_eq!(body["error"]["data"]["type"], "ParseError");
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_invalid_structure_keeps_id() {
        let (server, _) = server_with(Ok(Payload::new()));
        let body = serde_json::to_vec(&json!({"jsonrpc": "1.0", "id": 3, "method": "tools/call", "params": {}})).unwrap();

        let reply = dispatch(&server, &body).await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32600);
        assert_eq!(body["error"]["message"], "Invalid JSON-RPC request structure.");
        assert_eq!(body["id"], 3);
    }

    #[tokio::test]
    async fn test_non_object_body_is_invalid_request() {
        let (server, _) = server_with(Ok(Payload::new()));
        let reply = dispatch(&server, b"[1, 2, 3]").await;
        assert_eq!(reply.error_code(), Some(-32600));
    }

    #[tokio::test]
    async fn test_missing_tool_name_is_invalid_request() {
        let (server, _) = server_with(Ok(Payload::new()));
        let body = serde_json::to_vec(&json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"arguments": {}}
        }))
        .unwrap();

        let reply = dispatch(&server, &body).await;
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32600);
        assert!(body["error"]["message"].as_str().unwrap().contains("name"));
        assert_eq!(body["id"], 4);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let (server, _) = server_with(Ok(Payload::new()));
        let body = serde_json::to_vec(&json!({
            "jsonrpc": "2.0", "id": 8, "method": "tools/list",
            "params": {"name": "x"}
        }))
        .unwrap();

        let reply = dispatch(&server, &body).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32601);
        assert_eq!(body["error"]["message"], "Unsupported method: tools/list");
        assert_eq!(body["error"]["data"]["type"], "MethodNotFound");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (server, stub) = server_with(Ok(Payload::new()));
        let reply = dispatch(&server, &call("getNothing", json!({}))).await;

        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32601);
        assert_eq!(body["error"]["message"], "Tool 'getNothing' not found.");
        assert_eq!(body["error"]["data"]["type"], "ToolNotFound");
        assert!(stub.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_argument_is_validation_error() {
        let (server, stub) = server_with(Ok(Payload::new()));
        let reply = dispatch(&server, &call("getPlayerAchievements", json!({"appid": 440}))).await;

        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32602);
        assert_eq!(
            body["error"]["message"],
            "Invalid parameters for tool 'getPlayerAchievements'."
        );
        assert_eq!(body["error"]["data"]["type"], "ValidationError");
        let details = body["error"]["data"]["details"].as_array().unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0]["loc"], json!(["steamid"]));
        assert_eq!(details[0]["type"], "missing");
        assert!(stub.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_application_error() {
        let upstream = SteamApiError::application("Profile is private")
            .with_status(200)
            .with_details("Profile is private");
        let (server, _) = server_with(Err(upstream));

        let reply = dispatch(
            &server,
            &call("getPlayerAchievements", json!({"steamid": "1", "appid": 2})),
        )
        .await;

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32000);
        assert_eq!(body["error"]["message"], "Steam API Error: Profile is private");
        assert_eq!(
            body["error"]["data"],
            json!({
                "type": "SteamApiError",
                "details": {"status_code": 200, "details": "Profile is private"}
            })
        );
    }

    #[tokio::test]
    async fn test_network_error() {
        let upstream = SteamApiError::network("Could not connect to Steam API.", "connection refused");
        let (server, _) = server_with(Err(upstream));

        let reply = dispatch(&server, &call("getAppList", json!({}))).await;

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32001);
        assert_eq!(
            body["error"]["message"],
            "Network Error: Could not connect to Steam API."
        );
        assert_eq!(
            body["error"]["data"]["details"],
            json!({"details": "connection refused"})
        );
        assert_eq!(body["id"], 11);
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let server = McpServer::with_client(Config::for_api_key("k"), Arc::new(PanickingSteam)).unwrap();

        let reply = dispatch(&server, &call("getAppList", json!({}))).await;

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(&reply);
        assert_eq!(body["error"]["code"], -32603);
        assert_eq!(
            body["error"]["message"],
            "An unexpected internal server error occurred."
        );
        assert_eq!(body["error"]["data"]["type"], "InternalServerError");
        assert_eq!(body["id"], 11);
    }

    #[tokio::test]
    async fn test_news_defaults_reach_upstream() {
        let (server, stub) = server_with(Ok(payload(json!({"appnews": {"newsitems": []}}))));

        let reply = dispatch(&server, &call("getGameNews", json!({"appid": 440}))).await;

        assert_eq!(reply.status, StatusCode::OK);
        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests[0].params["count"], "10");
        assert_eq!(requests[0].params["maxlength"], "300");
    }
}
