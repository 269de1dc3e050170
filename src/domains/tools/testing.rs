//! Stub Steam client for handler and dispatcher tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::context::ToolContext;
use crate::core::config::Config;
use crate::domains::steam::{ApiRequest, Payload, SteamApi, SteamApiError, SteamResult};

/// Returns a canned result and records every request it receives.
#[derive(Default)]
pub struct StubSteam {
    response: Mutex<Option<SteamResult<Payload>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubSteam {
    /// Stub answering with a JSON object.
    pub fn ok(payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            other => panic!("stub payload must be an object, got {}", other),
        };
        Self::with_result(Ok(payload))
    }

    pub fn err(error: SteamApiError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: SteamResult<Payload>) -> Self {
        Self {
            response: Mutex::new(Some(result)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request seen so far.
    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was made")
    }
}

#[async_trait]
impl SteamApi for StubSteam {
    async fn call(&self, request: ApiRequest) -> SteamResult<Payload> {
        self.requests.lock().unwrap().push(request);
        self.response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Payload::new()))
    }
}

/// Test configuration with a fixed key and base URLs.
pub fn test_config() -> Config {
    Config::for_api_key("test-key")
}

/// Tool context backed by a stub.
pub fn context_with(stub: StubSteam) -> ToolContext {
    ToolContext::new(Arc::new(stub), Arc::new(test_config()))
}

/// Tool context sharing a stub with the test for later inspection.
pub fn shared_context(stub: StubSteam) -> (ToolContext, Arc<StubSteam>) {
    let stub = Arc::new(stub);
    let ctx = ToolContext::new(stub.clone(), Arc::new(test_config()));
    (ctx, stub)
}
