//! Outbound request descriptor for the Steam APIs.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Query parameters sent to Steam, in a stable order.
pub type QueryParams = BTreeMap<String, String>;

/// HTTP verb used for the upstream call. Steam endpoints are almost all GET.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpVerb {
    #[default]
    Get,
    Post,
}

impl HttpVerb {
    pub fn as_method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

/// Describes a single call to the Steam Web API or Store API.
///
/// Web API calls are addressed as `base/interface/method/version/`. Store API
/// calls (`interface` and `version` empty) are addressed as `base/method` and
/// carry everything else in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub interface: String,
    pub method: String,
    pub version: String,
    pub params: QueryParams,
    /// Overrides the configured Web API base URL.
    pub base_url: Option<String>,
    /// Whether the API key is injected as the `key` parameter.
    pub requires_key: bool,
    pub verb: HttpVerb,
}

impl ApiRequest {
    /// A keyed Web API request, e.g. `ISteamUserStats/GetSchemaForGame/v2`.
    pub fn web(
        interface: impl Into<String>,
        method: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            interface: interface.into(),
            method: method.into(),
            version: version.into(),
            params: QueryParams::new(),
            base_url: None,
            requires_key: true,
            verb: HttpVerb::Get,
        }
    }

    /// An unkeyed Store API request against `base_url`.
    pub fn store(base_url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            interface: String::new(),
            method: method.into(),
            version: String::new(),
            params: QueryParams::new(),
            base_url: Some(base_url.into()),
            requires_key: false,
            verb: HttpVerb::Get,
        }
    }

    /// Add a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn param_opt(self, name: impl Into<String>, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Merge a prepared set of parameters.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_verb(mut self, verb: HttpVerb) -> Self {
        self.verb = verb;
        self
    }

    /// `Interface/Method`, used in log lines and error details.
    pub fn endpoint_label(&self) -> String {
        if self.interface.is_empty() {
            self.method.clone()
        } else {
            format!("{}/{}", self.interface, self.method)
        }
    }
}
