//! MCP Server state.
//!
//! `McpServer` owns everything a request needs: the configuration, the tool
//! registry and the tool context wrapping the Steam client. It is cheap to
//! clone and shared read-only across request tasks.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `ToolRegistry::builtin()`. Adding a tool does not
//! require modifying this file.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::info;

use super::config::Config;
use super::error::Result;
use crate::domains::steam::{Payload, SteamApi, SteamClient};
use crate::domains::tools::{ToolContext, ToolRegistry, ToolResult};

/// Protocol version advertised on the server-info document.
pub const PROTOCOL_VERSION: &str = "1.0";

/// The main MCP server handle.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Immutable tool registry.
    registry: Arc<ToolRegistry>,

    /// Context handed to every tool handler.
    context: ToolContext,
}

impl McpServer {
    /// Create a server talking to the real Steam API.
    pub fn new(config: Config) -> Result<Self> {
        let client = SteamClient::new(&config.steam)?;
        Self::with_client(config, Arc::new(client))
    }

    /// Create a server with an arbitrary Steam client implementation.
    pub fn with_client(config: Config, steam: Arc<dyn SteamApi>) -> Result<Self> {
        let config = Arc::new(config);
        let registry = Arc::new(ToolRegistry::builtin()?);
        let context = ToolContext::new(steam, config.clone());

        info!(
            "Registered {} tools: {}",
            registry.len(),
            registry.tool_names().join(", ")
        );

        Ok(Self {
            config,
            registry,
            context,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Catalog entries for every tool, in registration order.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry.list_tools()
    }

    /// Static server-info document.
    pub fn server_info(&self) -> Value {
        json!({
            "name": self.name(),
            "version": self.version(),
            "description": self.config.server.description,
            "protocol_version": PROTOCOL_VERSION,
            "capabilities": {
                "tools": true,
                "resources": false,
                "streaming": false
            }
        })
    }

    /// Resolve, validate and run a tool.
    pub async fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> ToolResult<Payload> {
        self.registry.call_tool(&self.context, name, arguments).await
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("name", &self.name())
            .field("tools", &self.registry.len())
            .finish_non_exhaustive()
    }
}
