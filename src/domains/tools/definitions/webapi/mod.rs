//! Web API introspection tools.

pub mod supported_api_list;

pub use supported_api_list::SupportedApiListTool;
