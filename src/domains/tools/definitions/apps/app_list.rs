//! Full public app list tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{info, instrument};

use super::super::common::{has_nested, missing_object};
use crate::domains::steam::{ApiRequest, Payload};
use crate::domains::tools::{ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema};

/// `getAppList` tool implementation.
#[derive(Debug, Clone)]
pub struct AppListTool;

impl AppListTool {
    pub const NAME: &'static str = "getAppList";

    pub const DESCRIPTION: &'static str =
        "Retrieves the complete list of public applications available on Steam.";

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            ToolSchema::empty(),
            Self::handle,
        )
    }

    fn handle(ctx: &ToolContext, _args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        Self::execute(ctx).boxed()
    }

    #[instrument(skip_all)]
    pub async fn execute(ctx: &ToolContext) -> ToolResult<Payload> {
        info!("Handling getAppList");

        let payload = ctx
            .steam()
            .call(ApiRequest::web("ISteamApps", "GetAppList", "v2"))
            .await?;

        if !has_nested(&payload, "applist", "apps") {
            return Err(missing_object(
                "Invalid response structure for GetAppList",
                "API response missing 'applist' or 'applist.apps'.",
            ));
        }
        Ok(payload)
    }
}
