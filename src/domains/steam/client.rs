//! HTTP client for the Steam Web API and Store API.
//!
//! Steam reports failures in several ways: HTTP status codes, an empty
//! `response` wrapper, a `result` code other than 1, or a `playerstats`
//! object with `success: false`. The client folds all of them into
//! [`SteamApiError`] so handlers only ever see a decoded JSON object.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::error::{SteamApiError, SteamResult};
use super::request::{ApiRequest, QueryParams};
use crate::core::config::SteamConfig;

/// A decoded Steam payload (always a JSON object).
pub type Payload = Map<String, Value>;

/// Query parameter carrying the API key.
const KEY_PARAM: &str = "key";
const FORMAT_PARAM: &str = "format";
const DEFAULT_FORMAT: &str = "json";

/// Value of `response.result` that Steam uses for success.
const RESULT_OK: f64 = 1.0;

/// Abstraction over the Steam API so tools can run against a stub.
#[async_trait]
pub trait SteamApi: Send + Sync {
    /// Perform a call and return the normalized payload.
    async fn call(&self, request: ApiRequest) -> SteamResult<Payload>;
}

/// `reqwest`-backed Steam API client.
pub struct SteamClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    store_api_base_url: String,
}

impl std::fmt::Debug for SteamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamClient")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("store_api_base_url", &self.store_api_base_url)
            .finish()
    }
}

impl SteamClient {
    /// Build a client from configuration.
    pub fn new(config: &SteamConfig) -> SteamResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()
            .map_err(|e| SteamApiError::network("Failed to create HTTP client.", e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base_url: trim_base(&config.api_base_url).to_string(),
            store_api_base_url: trim_base(&config.store_api_base_url).to_string(),
        })
    }

    /// Resolve the full URL for a request.
    pub fn endpoint_url(&self, request: &ApiRequest) -> String {
        let base = request
            .base_url
            .as_deref()
            .map(trim_base)
            .unwrap_or(self.api_base_url.as_str());

        if base == self.store_api_base_url {
            format!("{}/{}", base, request.method)
        } else {
            format!(
                "{}/{}/{}/{}/",
                base, request.interface, request.method, request.version
            )
        }
    }

    /// Final query parameters: key injection and default format.
    fn prepare_params(&self, request: &ApiRequest) -> QueryParams {
        let mut params = request.params.clone();
        if request.requires_key {
            params.insert(KEY_PARAM.to_string(), self.api_key.clone());
        }
        params
            .entry(FORMAT_PARAM.to_string())
            .or_insert_with(|| DEFAULT_FORMAT.to_string());
        params
    }
}

#[async_trait]
impl SteamApi for SteamClient {
    async fn call(&self, request: ApiRequest) -> SteamResult<Payload> {
        let url = self.endpoint_url(&request);
        let params = self.prepare_params(&request);

        debug!(
            "Making {:?} request to {} with params: {}",
            request.verb,
            url,
            redacted_query(&params)
        );

        let response = self
            .http
            .request(request.verb.as_method(), &url)
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            error!("HTTP error from Steam API: {} - {}", status.as_u16(), body);
            return Err(SteamApiError::application(format!(
                "Steam API returned status {}",
                status.as_u16()
            ))
            .with_status(status.as_u16())
            .with_details(body));
        }

        classify_payload(&request, status.as_u16(), &body)
    }
}

/// Decode a 2xx body and apply Steam's in-band error conventions.
///
/// Store `appdetails` responses are keyed by app id and reported per id, so
/// none of the wrapper checks below ever match them.
pub fn classify_payload(request: &ApiRequest, status: u16, body: &str) -> SteamResult<Payload> {
    let data: Value = serde_json::from_str(body).map_err(|e| {
        error!("Failed to decode JSON response from Steam API: {}", e);
        SteamApiError::application("Invalid JSON response received from Steam API.")
            .with_details(e.to_string())
    })?;

    let Value::Object(data) = data else {
        return Err(
            SteamApiError::application("Unexpected response shape from Steam API.")
                .with_status(status)
                .with_details(data),
        );
    };

    debug!("Received response from {}", request.endpoint_label());

    if let Some(response) = data.get("response") {
        check_response_wrapper(response, request, status)?;
    }
    if let Some(Value::Object(playerstats)) = data.get("playerstats") {
        check_playerstats(playerstats, status)?;
    }

    Ok(data)
}

fn check_response_wrapper(response: &Value, request: &ApiRequest, status: u16) -> SteamResult<()> {
    if is_falsy(response) {
        return Err(SteamApiError::application("API returned an empty response.")
            .with_status(status)
            .with_details(format!("Check parameters for {}", request.endpoint_label())));
    }

    if let Some(result) = response.get("result") {
        if !is_result_ok(result) {
            let message = response
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown API error result code.");
            return Err(SteamApiError::application(format!("API Error: {}", message))
                .with_status(status)
                .with_details(response.clone()));
        }
    }

    Ok(())
}

fn check_playerstats(playerstats: &Map<String, Value>, status: u16) -> SteamResult<()> {
    // A missing `success` flag counts as success.
    let succeeded = playerstats.get("success").is_none_or(|v| !is_falsy(v));
    if succeeded {
        return Ok(());
    }

    let message = playerstats
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("Unknown API error in playerstats.");

    if message.contains("Profile is private") {
        return Err(SteamApiError::application("Profile is private")
            .with_status(status)
            .with_details(message));
    }

    Err(SteamApiError::application(format!("API Error: {}", message))
        .with_status(status)
        .with_details(Value::Object(playerstats.clone())))
}

/// Whether `response.result` carries Steam's success sentinel.
pub fn is_result_ok(result: &Value) -> bool {
    match result {
        Value::Number(n) => n.as_f64() == Some(RESULT_OK),
        Value::Bool(b) => *b,
        _ => false,
    }
}

/// Loose truthiness: null, false, zero and empty containers are falsy.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn transport_error(e: reqwest::Error) -> SteamApiError {
    let message = if e.is_timeout() {
        "Timeout connecting to Steam API."
    } else if e.is_connect() {
        "Could not connect to Steam API."
    } else {
        "An unexpected network error occurred."
    };
    error!("{} {}", message, e);
    SteamApiError::network(message, e.to_string())
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Query string for logging, with the API key masked.
fn redacted_query(params: &QueryParams) -> String {
    let masked: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| {
            if k == KEY_PARAM {
                (k.as_str(), "[REDACTED]")
            } else {
                (k.as_str(), v.as_str())
            }
        })
        .collect();
    serde_urlencoded::to_string(masked).unwrap_or_default()
}
