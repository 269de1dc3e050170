//! Domains module containing business logic organized by bounded contexts.
//!
//! - **steam**: the upstream Steam API client and its error taxonomy
//! - **tools**: tool schemas, handlers and the immutable registry

pub mod steam;
pub mod tools;
