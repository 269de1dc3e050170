//! Transport layer for the MCP server.
//!
//! The server speaks JSON-RPC 2.0 over HTTP:
//! - `jsonrpc`: envelope types and the error-code table
//! - `dispatch`: raw body → tool call → envelope
//! - `http`: axum router and listener
//! - `sse`: keep-alive event stream

pub(crate) mod config;
pub mod dispatch;
mod error;
pub mod http;
pub mod jsonrpc;
pub mod sse;

pub use config::HttpConfig;
pub use dispatch::dispatch;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, build_router};
