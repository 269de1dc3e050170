//! Supported Web API list tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{info, instrument};

use super::super::common::{has_nested, missing_object};
use crate::domains::steam::{ApiRequest, Payload};
use crate::domains::tools::{ToolArguments, ToolContext, ToolDefinition, ToolResult, ToolSchema};

/// `getSupportedApiList` tool implementation.
#[derive(Debug, Clone)]
pub struct SupportedApiListTool;

impl SupportedApiListTool {
    pub const NAME: &'static str = "getSupportedApiList";

    pub const DESCRIPTION: &'static str =
        "Retrieves the complete list of supported Steam Web API interfaces and methods.";

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

    /// List interfaces visible to the configured key.
    #[instrument(skip_all)]
    pub async fn execute(ctx: &ToolContext) -> ToolResult<Payload> {
        info!("Handling getSupportedApiList");

        let request = ApiRequest::web("ISteamWebAPIUtil", "GetSupportedAPIList", "v1");
        let payload = ctx.steam().call(request).await?;

        if !has_nested(&payload, "apilist", "interfaces") {
            return Err(missing_object(
                "Invalid response structure for GetSupportedAPIList",
                "API response missing 'apilist' or 'apilist.interfaces'.",
            ));
        }
        Ok(payload)
    }
}
