//! Global achievement percentages tool.
//!
//! Clients send the game as `gameid`, which is also the name Steam expects.
//! Internally the value is handled as `appid`.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{Span, field, info, instrument};

use super::super::common::{has_nested, missing_object};
use crate::domains::steam::{ApiRequest, Payload, SteamApiError};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolResult,
    ToolSchema,
};

/// Status Steam uses for an unknown gameid.
const INVALID_GAMEID_STATUS: u16 = 400;

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalAchievementPercentagesParams {
    /// Steam application ID of the game.
    pub appid: i64,
}

/// `getGlobalAchievementPercentages` tool implementation.
#[derive(Debug, Clone)]
pub struct GlobalAchievementPercentagesTool;

impl GlobalAchievementPercentagesTool {
    pub const NAME: &'static str = "getGlobalAchievementPercentages";

    pub const DESCRIPTION: &'static str =
        "Retrieves the global achievement completion percentages for a specific game.";

    pub fn schema() -> ToolSchema {
        ToolSchema::new(vec![
            ParamDef::required(
                "appid",
                ParamType::Integer,
                "The Steam Application ID of the game. Mapped to 'gameid' for the API call.",
            )
            .with_alias("gameid"),
        ])
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self::handle)
    }

    fn handle(ctx: &ToolContext, args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        async move { Self::execute(ctx, &args).await }.boxed()
    }

    /// Fetch percentages; a 400 from Steam means the gameid is unknown.
    #[instrument(skip_all, fields(gameid = field::Empty))]
    pub async fn execute(ctx: &ToolContext, args: &ToolArguments) -> ToolResult<Payload> {
        let params: GlobalAchievementPercentagesParams = args.parse()?;
        Span::current().record("gameid", params.appid);
        info!(
            "Handling getGlobalAchievementPercentages for gameid: {}",
            params.appid
        );

        match Self::fetch(ctx, args, params.appid).await {
            Err(ToolError::Upstream(e)) if e.status_code() == Some(INVALID_GAMEID_STATUS) => {
                Err(ToolError::Upstream(SteamApiError::Application {
                    message: format!(
                        "Invalid gameid or no achievements found for gameid {}",
                        params.appid
                    ),
                    status_code: e.status_code(),
                    details: e.details().cloned(),
                }))
            }
            other => other,
        }
    }

    async fn fetch(ctx: &ToolContext, args: &ToolArguments, appid: i64) -> ToolResult<Payload> {
        let request = ApiRequest::web(
            "ISteamUserStats",
            "GetGlobalAchievementPercentagesForApp",
            "v2",
        )
        .with_params(Self::schema().wire_params(args));
        let payload = ctx.steam().call(request).await?;

        if !has_nested(&payload, "achievementpercentages", "achievements") {
            return Err(missing_object(
                format!("Could not retrieve achievement percentages for gameid {}", appid),
                "API response missing 'achievementpercentages' or \
                 'achievementpercentages.achievements'. Check gameid.",
            ));
        }
        Ok(payload)
    }
}
