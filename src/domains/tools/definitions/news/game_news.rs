//! Game news tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::missing_object;
use crate::domains::steam::{ApiRequest, Payload};
use crate::domains::tools::{
    ParamDef, ParamType, ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema,
};

/// Default number of news items.
pub const DEFAULT_COUNT: i64 = 10;
/// Default truncation length for item contents; 0 means full content.
pub const DEFAULT_MAX_LENGTH: i64 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct GameNewsParams {
    /// Steam application ID of the game.
    pub appid: i64,

    /// Number of news items to return.
    pub count: i64,

    /// Maximum length of each news item body.
    pub maxlength: i64,
}

/// `getGameNews` tool implementation.
#[derive(Debug, Clone)]
pub struct GameNewsTool;

impl GameNewsTool {
    pub const NAME: &'static str = "getGameNews";

    pub const DESCRIPTION: &'static str = "Retrieves the latest news items for a given AppID.";

    pub fn schema() -> ToolSchema {
        ToolSchema::new(vec![
            ParamDef::required(
                "appid",
                ParamType::Integer,
                "The Steam Application ID of the game.",
            ),
            ParamDef::optional(
                "count",
                ParamType::Integer,
                "Number of news items to retrieve.",
            )
            .with_default(DEFAULT_COUNT),
            ParamDef::optional(
                "maxlength",
                ParamType::Integer,
                "Maximum length of the 'contents' field for each news item. 0 for full content.",
            )
            .with_default(DEFAULT_MAX_LENGTH),
        ])
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self::handle)
    }

    fn handle(ctx: &ToolContext, args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        async move {
            let params: GameNewsParams = args.parse()?;
            Self::execute(ctx, &params).await
        }
        .boxed()
    }

    #[instrument(skip_all, fields(appid = params.appid))]
    pub async fn execute(ctx: &ToolContext, params: &GameNewsParams) -> ToolResult<Payload> {
        info!(
            "Handling getGameNews for appid: {}, count: {}, maxlength: {}",
            params.appid, params.count, params.maxlength
        );

        let request = ApiRequest::web("ISteamNews", "GetNewsForApp", "v2")
            .param("appid", params.appid)
            .param("count", params.count)
            .param("maxlength", params.maxlength);
        let payload = ctx.steam().call(request).await?;

        if !payload.contains_key("appnews") {
            return Err(missing_object(
                format!("News not found for appid {}", params.appid),
                "API returned success but no 'appnews' object.",
            ));
        }
        Ok(payload)
    }
}
