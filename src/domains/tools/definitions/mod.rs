//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file, grouped by the Steam interface it
//! talks to.

pub mod apps;
mod common;
pub mod news;
pub mod user_stats;
pub mod webapi;

pub use apps::{AppDetailsParams, AppDetailsTool, AppListTool};
pub use news::{GameNewsParams, GameNewsTool};
pub use user_stats::{
    CurrentPlayersParams, CurrentPlayersTool, GameSchemaParams, GameSchemaTool,
    GlobalAchievementPercentagesParams, GlobalAchievementPercentagesTool,
    GlobalStatsForGameParams, GlobalStatsForGameTool, PlayerAchievementsParams,
    PlayerAchievementsTool, UserStatsForGameParams, UserStatsForGameTool,
};
pub use webapi::SupportedApiListTool;
