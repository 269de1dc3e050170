//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is built once at startup and never mutated afterwards. Each
//! entry pairs an explicit argument schema with a handler function.

use std::collections::HashMap;

use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::context::ToolContext;
use super::definitions::{
    AppDetailsTool, AppListTool, CurrentPlayersTool, GameNewsTool, GameSchemaTool,
    GlobalAchievementPercentagesTool, GlobalStatsForGameTool, PlayerAchievementsTool,
    SupportedApiListTool, UserStatsForGameTool,
};
use super::error::{ToolError, ToolResult};
use super::schema::{ToolArguments, ToolSchema};
use crate::domains::steam::Payload;

/// Handler signature shared by every tool.
pub type ToolHandlerFn =
    for<'a> fn(&'a ToolContext, ToolArguments) -> BoxFuture<'a, ToolResult<Payload>>;

// ============================================================================
// Tool definition
// ============================================================================

/// A registered tool: name, description, schema and handler.
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: ToolSchema,
    handler: ToolHandlerFn,
}

impl ToolDefinition {
    pub fn new(
        name: &'static str,
        description: &'static str,
        schema: ToolSchema,
        handler: ToolHandlerFn,
    ) -> Self {
        Self {
            name,
            description,
            schema,
            handler,
        }
    }

    /// Run the handler on already-validated arguments.
    pub fn invoke<'a>(
        &self,
        ctx: &'a ToolContext,
        arguments: ToolArguments,
    ) -> BoxFuture<'a, ToolResult<Payload>> {
        (self.handler)(ctx, arguments)
    }

    /// Catalog entry for this tool.
    pub fn to_catalog_entry(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.schema.to_json_schema(),
        })
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Immutable name → definition map, in registration order.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(definitions: Vec<ToolDefinition>) -> ToolResult<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.name, position).is_some() {
                return Err(ToolError::Duplicate(definition.name.to_string()));
            }
        }
        Ok(Self {
            tools: definitions,
            index,
        })
    }

    /// Registry with every Steam tool.
    pub fn builtin() -> ToolResult<Self> {
        Self::new(vec![
            CurrentPlayersTool::definition(),
            AppDetailsTool::definition(),
            GameSchemaTool::definition(),
            GameNewsTool::definition(),
            PlayerAchievementsTool::definition(),
            UserStatsForGameTool::definition(),
            SupportedApiListTool::definition(),
            AppListTool::definition(),
            GlobalAchievementPercentagesTool::definition(),
            GlobalStatsForGameTool::definition(),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Catalog entries for every tool.
    pub fn list_tools(&self) -> Vec<Value> {
        self.tools.iter().map(ToolDefinition::to_catalog_entry).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolve, validate and invoke a tool.
    pub async fn call_tool(
        &self,
        ctx: &ToolContext,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> ToolResult<Payload> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let validated = tool.schema.validate(arguments).inspect_err(|e| {
            if let ToolError::InvalidArguments(errors) = e {
                warn!("Invalid parameters for tool '{}': {:?}", name, errors);
            }
        })?;

        info!("Executing tool '{}' with args: {:?}", name, validated);
        let result = tool.invoke(ctx, validated).await?;
        info!("Tool '{}' executed successfully.", name);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::{ParamDef, ParamType};
    use crate::domains::tools::testing::{StubSteam, context_with};
    use futures::FutureExt;
    use serde_json::json;

    fn echo_handler(_ctx: &ToolContext, args: ToolArguments) -> BoxFuture<'_, ToolResult<Payload>> {
        async move {
            let mut payload = Payload::new();
            payload.insert("args".into(), args.get("appid").cloned().unwrap_or_default());
            Ok(payload)
        }
        .boxed()
    }

    fn echo_definition(name: &'static str) -> ToolDefinition {
        ToolDefinition::new(
            name,
            "Echo",
            ToolSchema::new(vec![ParamDef::required("appid", ParamType::Integer, "App id")]),
            echo_handler,
        )
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::builtin().unwrap();
        let names = registry.tool_names();
        assert_eq!(names.len(), 10);
        assert_eq!(registry.len(), 10);
        assert!(names.contains(&"getCurrentPlayers"));
        assert!(names.contains(&"getAppDetails"));
        assert!(names.contains(&"getGameSchema"));
        assert!(names.contains(&"getGameNews"));
        assert!(names.contains(&"getPlayerAchievements"));
        assert!(names.contains(&"getUserStatsForGame"));
        assert!(names.contains(&"getSupportedApiList"));
        assert!(names.contains(&"getAppList"));
        assert!(names.contains(&"getGlobalAchievementPercentages"));
        assert!(names.contains(&"getGlobalStatsForGame"));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = ToolRegistry::new(vec![echo_definition("a"), echo_definition("a")]);
        assert!(matches!(result, Err(ToolError::Duplicate(name)) if name == "a"));
    }

    #[test]
    fn test_catalog_entries() {
        let registry = ToolRegistry::builtin().unwrap();
        let tools = registry.list_tools();
        assert_eq!(tools.len(), 10);
        assert_eq!(tools[0]["name"], "getCurrentPlayers");
        assert_eq!(tools[0]["input_schema"]["required"], json!(["appid"]));

        let percentages = tools
            .iter()
            .find(|t| t["name"] == "getGlobalAchievementPercentages")
            .unwrap();
        assert!(percentages["input_schema"]["properties"]["gameid"].is_object());
    }

    #[tokio::test]
    async fn test_call_tool_validates_before_invoking() {
        let registry = ToolRegistry::new(vec![echo_definition("echo")]).unwrap();
        let ctx = context_with(StubSteam::default());

        let ok = registry
            .call_tool(&ctx, "echo", json!({"appid": "7"}).as_object().unwrap())
            .await
            .unwrap();
        assert_eq!(ok["args"], 7);

        let err = registry.call_tool(&ctx, "echo", &Map::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::builtin().unwrap();
        let ctx = context_with(StubSteam::default());
        let err = registry.call_tool(&ctx, "unknown", &Map::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "unknown"));
    }
}
