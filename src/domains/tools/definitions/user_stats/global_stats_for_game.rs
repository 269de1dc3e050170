//! Aggregated global stats tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use super::super::common::{missing_object, object_mut};
use crate::domains::steam::{ApiRequest, Payload, SteamApiError, is_result_ok};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema,
};

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalStatsForGameParams {
    /// Steam application ID of the game.
    pub appid: i64,

    /// API names of the global stats to aggregate.
    pub stat_names: Vec<String>,

    /// Start of the aggregation window as a Unix timestamp.
    pub start_date: Option<i64>,

    /// End of the aggregation window as a Unix timestamp.
    pub end_date: Option<i64>,
}

/// `getGlobalStatsForGame` tool implementation.
#[derive(Debug, Clone)]
pub struct GlobalStatsForGameTool;

impl GlobalStatsForGameTool {
    pub const NAME: &'static str = "getGlobalStatsForGame";

    pub const DESCRIPTION: &'static str =
        "Retrieves aggregated global stats for a specific game.";

    pub fn schema() -> ToolSchema {
        ToolSchema::new(vec![
            ParamDef::required(
                "appid",
                ParamType::Integer,
                "The Steam Application ID of the game.",
            ),
            ParamDef::required(
                "stat_names",
                ParamType::StringList,
                "List of specific global stat API names to retrieve.",
            ),
            ParamDef::optional(
                "start_date",
                ParamType::Integer,
                "Optional Unix timestamp for the start date.",
            ),
            ParamDef::optional(
                "end_date",
                ParamType::Integer,
                "Optional Unix timestamp for the end date.",
            ),
        ])
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self::handle)
    }

    fn handle(ctx: &ToolContext, args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        async move {
            let params: GlobalStatsForGameParams = args.parse()?;
            Self::execute(ctx, &params).await
        }
        .boxed()
    }

    /// Build the request: stat names become `name[0]`, `name[1]`, ...
    pub fn build_request(params: &GlobalStatsForGameParams) -> ApiRequest {
        let request = params.stat_names.iter().enumerate().fold(
            ApiRequest::web("ISteamUserStats", "GetGlobalStatsForGame", "v1")
                .param("appid", params.appid)
                .param("count", params.stat_names.len()),
            |request, (i, name)| request.param(format!("name[{}]", i), name),
        );

        request
            .param_opt("startdate", params.start_date)
            .param_opt("enddate", params.end_date)
    }

    #[instrument(skip_all, fields(appid = params.appid, stats = params.stat_names.len()))]
    pub async fn execute(ctx: &ToolContext, params: &GlobalStatsForGameParams) -> ToolResult<Payload> {
        info!(
            "Handling getGlobalStatsForGame for appid: {}, stats: {:?}",
            params.appid, params.stat_names
        );

        let mut payload = ctx.steam().call(Self::build_request(params)).await?;

        if !payload.contains_key("response") {
            return Err(missing_object(
                "Invalid response structure for GetGlobalStatsForGame",
                "API response missing 'response'.",
            ));
        }

        let response = object_mut(&mut payload, "response")?;
        if !response.contains_key("globalstats") {
            if !response.get("result").is_some_and(is_result_ok) {
                let message = response
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        format!("Unknown error retrieving global stats for {}", params.appid)
                    });
                return Err(SteamApiError::application(message)
                    .with_details(Value::Object(response.clone()))
                    .into());
            }

            warn!(
                "GetGlobalStatsForGame for appid {} returned result=1 but no 'globalstats' object. Returning empty stats.",
                params.appid
            );
            response.insert("globalstats".to_string(), Value::Object(Map::new()));
        }

        Ok(payload)
    }
}
