//! Application catalog tools (Store API details and the full app list).

pub mod app_details;
pub mod app_list;

pub use app_details::{AppDetailsParams, AppDetailsTool};
pub use app_list::AppListTool;
