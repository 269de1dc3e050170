//! Current player count tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::steam::{ApiRequest, Payload};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema,
};

/// Parameters for the current players lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPlayersParams {
    /// Steam application ID of the game.
    pub appid: i64,
}

/// `getCurrentPlayers` tool implementation.
#[derive(Debug, Clone)]
pub struct CurrentPlayersTool;

impl CurrentPlayersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getCurrentPlayers";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Retrieves the current number of players for a given Steam AppID.";

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
            let params: CurrentPlayersParams = args.parse()?;
            Self::execute(ctx, &params).await
        }
        .boxed()
    }

    /// Fetch the player count.
    #[instrument(skip_all, fields(appid = params.appid))]
    pub async fn execute(ctx: &ToolContext, params: &CurrentPlayersParams) -> ToolResult<Payload> {
        info!("Handling getCurrentPlayers for appid: {}", params.appid);

        let request = ApiRequest::web("ISteamUserStats", "GetNumberOfCurrentPlayers", "v1")
            .param("appid", params.appid);

        Ok(ctx.steam().call(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::steam::SteamApiError;
    use crate::domains::tools::ToolError;
    use crate::domains::tools::testing::{StubSteam, shared_context};
    use serde_json::json;

    #[tokio::test]
    async fn test_current_players_passthrough() {
        let payload = json!({"response": {"player_count": 512, "result": 1}});
        let (ctx, stub) = shared_context(StubSteam::ok(payload.clone()));

        let result = CurrentPlayersTool::execute(&ctx, &CurrentPlayersParams { appid: 570 })
            .await
            .unwrap();

        assert_eq!(serde_json::Value::Object(result), payload);
        let request = stub.last_request();
        assert_eq!(request.interface, "ISteamUserStats");
        assert_eq!(request.method, "GetNumberOfCurrentPlayers");
        assert_eq!(request.version, "v1");
        assert_eq!(request.params["appid"], "570");
        assert!(request.requires_key);
    }

    #[tokio::test]
    async fn test_current_players_propagates_network_error() {
        let (ctx, _) = shared_context(StubSteam::err(SteamApiError::network(
            "Could not connect to Steam API.",
            "connection refused",
        )));

        let err = CurrentPlayersTool::execute(&ctx, &CurrentPlayersParams { appid: 570 })
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Upstream(e) if e.is_network()));
    }
}
