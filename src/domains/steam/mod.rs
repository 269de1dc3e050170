//! Steam upstream domain.
//!
//! - `request.rs` - Outbound request descriptor
//! - `client.rs` - `SteamApi` trait and the `reqwest` implementation
//! - `error.rs` - The two upstream failure kinds

mod client;
mod error;
mod request;

pub use client::{Payload, SteamApi, SteamClient, classify_payload, is_result_ok};
pub use error::{SteamApiError, SteamResult};
pub use request::{ApiRequest, HttpVerb, QueryParams};
