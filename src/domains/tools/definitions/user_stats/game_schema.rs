//! Game schema tool (stat and achievement definitions for a game).

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::missing_object;
use crate::domains::steam::{ApiRequest, Payload, SteamApiError};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolResult,
    ToolSchema,
};

/// Steam answers 500 with this text for games without stats.
const NO_STATS_SIGNATURE: &str = "Requested app has no stats";
const NO_STATS_STATUS: u16 = 500;

/// Parameters for the schema lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct GameSchemaParams {
    /// Steam application ID of the game.
    pub appid: i64,
}

/// `getGameSchema` tool implementation.
#[derive(Debug, Clone)]
pub struct GameSchemaTool;

impl GameSchemaTool {
    pub const NAME: &'static str = "getGameSchema";

    pub const DESCRIPTION: &'static str =
        "Retrieves the game schema (stats and achievements definitions) for a given AppID.";

    pub fn schema() -> ToolSchema {
        ToolSchema::new(vec![ParamDef::required(
            "appid",
            ParamType::Integer,
            "The Steam Application ID of the game.",
        )])
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self::handle)
    }

    fn handle(ctx: &ToolContext, args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        async move {
            let params: GameSchemaParams = args.parse()?;
            Self::execute(ctx, &params).await
        }
        .boxed()
    }

    /// Fetch the schema, clarifying Steam's "no stats" failure.
    #[instrument(skip_all, fields(appid = params.appid))]
    pub async fn execute(ctx: &ToolContext, params: &GameSchemaParams) -> ToolResult<Payload> {
        info!("Handling getGameSchema for appid: {}", params.appid);

        match Self::fetch(ctx, params.appid).await {
            Err(ToolError::Upstream(e)) if has_no_stats(&e) => {
                Err(ToolError::Upstream(SteamApiError::Application {
                    message: format!(
                        "Schema not found or app has no stats for appid {}",
                        params.appid
                    ),
                    status_code: e.status_code(),
                    details: e.details().cloned(),
                }))
            }
            other => other,
        }
    }

    async fn fetch(ctx: &ToolContext, appid: i64) -> ToolResult<Payload> {
        let request =
            ApiRequest::web("ISteamUserStats", "GetSchemaForGame", "v2").param("appid", appid);
        let payload = ctx.steam().call(request).await?;

        if !payload.contains_key("game") {
            return Err(missing_object(
                format!("Schema not found for appid {}", appid),
                "API returned success but no 'game' object.",
            ));
        }
        Ok(payload)
    }
}

fn has_no_stats(error: &SteamApiError) -> bool {
    error.status_code() == Some(NO_STATS_STATUS)
        && error
            .details_text()
            .is_some_and(|details| details.contains(NO_STATS_SIGNATURE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{StubSteam, context_with};
    use serde_json::json;

    fn params() -> GameSchemaParams {
        GameSchemaParams { appid: 4000 }
    }

    #[tokio::test]
    async fn test_schema_returned() {
        let ctx = context_with(StubSteam::ok(json!({"game": {"gameName": "Garry's Mod"}})));
        let result = GameSchemaTool::execute(&ctx, &params()).await.unwrap();
        assert_eq!(result["game"]["gameName"], "Garry's Mod");
    }

    #[tokio::test]
    async fn test_missing_game_object() {
        let ctx = context_with(StubSteam::ok(json!({})));
        let err = GameSchemaTool::execute(&ctx, &params()).await.unwrap_err();
        match err {
            ToolError::Upstream(e) => {
                assert_eq!(e.message(), "Schema not found for appid 4000");
                assert_eq!(e.status_code(), None);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_stats_error_is_clarified() {
        let upstream = SteamApiError::application("Steam API returned status 500")
            .with_status(500)
            .with_details("<html>Requested app has no stats</html>");
        let ctx = context_with(StubSteam::err(upstream));

        let err = GameSchemaTool::execute(&ctx, &params()).await.unwrap_err();
        match err {
            ToolError::Upstream(e) => {
                assert_eq!(
                    e.message(),
                    "Schema not found or app has no stats for appid 4000"
                );
                assert_eq!(e.status_code(), Some(500));
                assert_eq!(
                    e.details_text().as_deref(),
                    Some("<html>Requested app has no stats</html>")
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_500_unchanged() {
        let upstream = SteamApiError::application("Steam API returned status 500")
            .with_status(500)
            .with_details("Internal Server Error");
        let ctx = context_with(StubSteam::err(upstream));

        let err = GameSchemaTool::execute(&ctx, &params()).await.unwrap_err();
        assert_eq!(err.to_string(), "Steam API returned status 500");
    }
}
