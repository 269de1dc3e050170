//! Store page details tool.
//!
//! This is the only tool that talks to the Store API: the request is unkeyed
//! and addressed as `{store_base}/appdetails`. The result is keyed by app id
//! and passed through untouched, including per-app `success: false` entries.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::steam::{ApiRequest, Payload};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema,
};

/// Parameters for the app details lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct AppDetailsParams {
    /// Application IDs to look up.
    pub appids: Vec<i64>,

    /// Two-letter country code for regional pricing.
    pub country: Option<String>,
}

impl AppDetailsParams {
    /// Country code, if one was given and is not blank.
    fn country(&self) -> Option<&str> {
        self.country.as_deref().filter(|c| !c.is_empty())
    }
}

/// `getAppDetails` tool implementation.
#[derive(Debug, Clone)]
pub struct AppDetailsTool;

impl AppDetailsTool {
    pub const NAME: &'static str = "getAppDetails";

    pub const DESCRIPTION: &'static str =
        "Retrieves store page details for one or more Steam AppIDs.";

    pub fn schema() -> ToolSchema {
        ToolSchema::new(vec![
            ParamDef::required(
                "appids",
                ParamType::IntegerList,
                "A list of Steam Application IDs.",
            ),
            ParamDef::optional(
                "country",
                ParamType::String,
                "ISO 3166 country code for regional pricing/filtering (e.g., 'US', 'GB'). Optional.",
            ),
        ])
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self::handle)
    }

    fn handle(ctx: &ToolContext, args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        async move {
            let params: AppDetailsParams = args.parse()?;
            Self::execute(ctx, &params).await
        }
        .boxed()
    }

    pub fn build_request(store_base_url: &str, params: &AppDetailsParams) -> ApiRequest {
        let appids = params
            .appids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let request = ApiRequest::store(store_base_url, "appdetails").param("appids", appids);
        match params.country() {
            Some(country) => request.param("cc", country).param("l", "en"),
            None => request,
        }
    }

    #[instrument(skip_all, fields(apps = params.appids.len()))]
    pub async fn execute(ctx: &ToolContext, params: &AppDetailsParams) -> ToolResult<Payload> {
        info!(
            "Handling getAppDetails for appids: {:?}, country: {:?}",
            params.appids, params.country
        );

        let request = Self::build_request(ctx.store_base_url(), params);
        Ok(ctx.steam().call(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{StubSteam, shared_context};
    use serde_json::json;

    fn params(appids: Vec<i64>, country: Option<&str>) -> AppDetailsParams {
        AppDetailsParams {
            appids,
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn test_request_joins_appids() {
        let request = AppDetailsTool::build_request(
            "https://store.example/api",
            &params(vec![10, 20, 30], None),
        );
        assert_eq!(request.params["appids"], "10,20,30");
        assert!(!request.params.contains_key("cc"));
        assert!(!request.params.contains_key("l"));
        assert!(!request.requires_key);
        assert_eq!(request.base_url.as_deref(), Some("https://store.example/api"));
    }

    #[test]
    fn test_country_adds_language() {
        let request = AppDetailsTool::build_request("s", &params(vec![10], Some("GB")));
        assert_eq!(request.params["cc"], "GB");
        assert_eq!(request.params["l"], "en");
    }

    #[test]
    fn test_blank_country_ignored() {
        let request = AppDetailsTool::build_request("s", &params(vec![10], Some("")));
        assert!(!request.params.contains_key("cc"));
    }

    #[tokio::test]
    async fn test_per_app_failure_passed_through() {
        let payload = json!({
            "10": {"success": true, "data": {"name": "Counter-Strike"}},
            "999999": {"success": false}
        });
        let (ctx, stub) = shared_context(StubSteam::ok(payload.clone()));

        let result = AppDetailsTool::execute(&ctx, &params(vec![10, 999999], None))
            .await
            .unwrap();

        assert_eq!(serde_json::Value::Object(result), payload);
        assert_eq!(
            stub.last_request().base_url.as_deref(),
            Some(ctx.store_base_url())
        );
    }
}
