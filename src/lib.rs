//! SteamStats MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing Steam statistics as
//! JSON-RPC tools over HTTP.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, server state and the HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **steam**: the upstream Steam Web/Store API client
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use steamstats_mcp_server::core::{Config, HttpTransport, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let transport = HttpTransport::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
