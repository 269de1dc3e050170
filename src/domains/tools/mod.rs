//! Tools domain module.
//!
//! Tools are the operations MCP clients can invoke. Each one wraps a single
//! Steam endpoint and declares the arguments it accepts.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Argument declarations and validation
//! - `registry.rs` - Name → tool lookup and invocation
//! - `context.rs` - Shared state passed to handlers
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with `NAME`, `DESCRIPTION`,
//!    `schema()`, `definition()` and `execute()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `ToolRegistry::builtin()`

mod context;
pub mod definitions;
mod error;
mod registry;
mod schema;

#[cfg(test)]
mod testing;

pub use context::ToolContext;
pub use error::{FieldError, ToolError, ToolResult};
pub use registry::{ToolDefinition, ToolHandlerFn, ToolRegistry};
pub use schema::{ParamDef, ParamType, ToolArguments, ToolSchema};
