//! Player achievements tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::{default_to_empty_list, missing_object, object_mut};
use crate::domains::steam::{ApiRequest, Payload};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema,
};

/// Parameters for the player achievements lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerAchievementsParams {
    /// 64-bit Steam ID of the player.
    pub steamid: String,

    /// Steam application ID of the game.
    pub appid: i64,
}

/// `getPlayerAchievements` tool implementation.
#[derive(Debug, Clone)]
pub struct PlayerAchievementsTool;

impl PlayerAchievementsTool {
    pub const NAME: &'static str = "getPlayerAchievements";

    pub const DESCRIPTION: &'static str =
        "Retrieves a player's achievement status for a specific game.";

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
            let params: PlayerAchievementsParams = args.parse()?;
            Self::execute(ctx, &params).await
        }
        .boxed()
    }

    /// Fetch achievements; a player with none gets an empty list.
    #[instrument(skip_all, fields(steamid = %params.steamid, appid = params.appid))]
    pub async fn execute(
        ctx: &ToolContext,
        params: &PlayerAchievementsParams,
    ) -> ToolResult<Payload> {
        info!(
            "Handling getPlayerAchievements for steamid: {}, appid: {}",
            params.steamid, params.appid
        );

        let request = ApiRequest::web("ISteamUserStats", "GetPlayerAchievements", "v1")
            .param("steamid", &params.steamid)
            .param("appid", params.appid)
            .param("l", "english");
        let mut payload = ctx.steam().call(request).await?;

        if !payload.contains_key("playerstats") {
            return Err(missing_object(
                format!(
                    "Could not retrieve player achievements for steamid {}, appid {}",
                    params.steamid, params.appid
                ),
                "API returned success but no 'playerstats' object.",
            ));
        }

        default_to_empty_list(object_mut(&mut payload, "playerstats")?, "achievements");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolError;
    use crate::domains::tools::testing::{StubSteam, shared_context};
    use serde_json::json;

    fn params() -> PlayerAchievementsParams {
        PlayerAchievementsParams {
            steamid: "76561197960435530".to_string(),
            appid: 440,
        }
    }

    #[tokio::test]
    async fn test_missing_achievements_become_empty_list() {
        let (ctx, stub) = shared_context(StubSteam::ok(json!({
            "playerstats": {"steamID": "76561197960435530", "gameName": "TF2", "success": true}
        })));

        let result = PlayerAchievementsTool::execute(&ctx, &params()).await.unwrap();

        assert_eq!(result["playerstats"]["achievements"], json!([]));
        assert_eq!(result["playerstats"]["gameName"], "TF2");

        let request = stub.last_request();
        assert_eq!(request.params["l"], "english");
        assert_eq!(request.params["steamid"], "76561197960435530");
    }

    #[tokio::test]
    async fn test_existing_achievements_kept() {
        let achievements = json!([{"apiname": "WIN_ONE", "achieved": 1}]);
        let (ctx, _) = shared_context(StubSteam::ok(json!({
            "playerstats": {"achievements": achievements.clone()}
        })));

        let result = PlayerAchievementsTool::execute(&ctx, &params()).await.unwrap();
        assert_eq!(result["playerstats"]["achievements"], achievements);
    }

    #[tokio::test]
    async fn test_missing_playerstats() {
        let (ctx, _) = shared_context(StubSteam::ok(json!({"other": 1})));
        let err = PlayerAchievementsTool::execute(&ctx, &params()).await.unwrap_err();
        assert!(err.to_string().contains("Could not retrieve player achievements"));
        assert!(matches!(err, ToolError::Upstream(_)));
    }
}
