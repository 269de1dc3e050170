//! Per-user game statistics tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::{default_to_empty_list, missing_object, object_mut};
use crate::domains::steam::{ApiRequest, Payload};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema,
};

#[derive(Debug, Clone, Deserialize)]
pub struct UserStatsForGameParams {
    /// 64-bit Steam ID of the player.
    pub steamid: String,

    /// Steam application ID of the game.
    pub appid: i64,
}

/// `getUserStatsForGame` tool implementation.
#[derive(Debug, Clone)]
pub struct UserStatsForGameTool;

impl UserStatsForGameTool {
    pub const NAME: &'static str = "getUserStatsForGame";

    pub const DESCRIPTION: &'static str =
        "Retrieves detailed statistics for a user in a specific game.";

    pub fn schema() -> ToolSchema {
        ToolSchema::new(vec![
            ParamDef::required("steamid", ParamType::String, "The player's 64-bit Steam ID."),
            ParamDef::required(
                "appid",
                ParamType::Integer,
                "The Steam Application ID of the game.",
            ),
        ])
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self::handle)
    }

    fn handle(ctx: &ToolContext, args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        async move {
            let params: UserStatsForGameParams = args.parse()?;
            Self::execute(ctx, &params).await
        }
        .boxed()
    }

    #[instrument(skip_all, fields(steamid = %params.steamid, appid = params.appid))]
    pub async fn execute(ctx: &ToolContext, params: &UserStatsForGameParams) -> ToolResult<Payload> {
        info!(
            "Handling getUserStatsForGame for steamid: {}, appid: {}",
            params.steamid, params.appid
        );

        let request = ApiRequest::web("ISteamUserStats", "GetUserStatsForGame", "v1")
            .param("steamid", &params.steamid)
            .param("appid", params.appid);
        let mut payload = ctx.steam().call(request).await?;

        if !payload.contains_key("playerstats") {
            return Err(missing_object(
                format!(
                    "Could not retrieve user stats for steamid {}, appid {}",
                    params.steamid, params.appid
                ),
                "API returned success but no 'playerstats' object.",
            ));
        }

        let playerstats = object_mut(&mut payload, "playerstats")?;
        default_to_empty_list(playerstats, "stats");
        default_to_empty_list(playerstats, "achievements");
        Ok(payload)
    }
}
