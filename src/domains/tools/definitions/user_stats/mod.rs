//! `ISteamUserStats` tools module.
//!
//! - `current_players`: live player count for an app
//! - `game_schema`: stat and achievement definitions
//! - `player_achievements` / `user_stats_for_game`: per-player data
//! - `global_achievement_percentages` / `global_stats_for_game`: aggregates

pub mod current_players;
pub mod game_schema;
pub mod global_achievement_percentages;
pub mod global_stats_for_game;
pub mod player_achievements;
pub mod user_stats_for_game;

pub use current_players::{CurrentPlayersParams, CurrentPlayersTool};
pub use game_schema::{GameSchemaParams, GameSchemaTool};
pub use global_achievement_percentages::{
    GlobalAchievementPercentagesParams, GlobalAchievementPercentagesTool,
};
pub use global_stats_for_game::{GlobalStatsForGameParams, GlobalStatsForGameTool};
pub use player_achievements::{PlayerAchievementsParams, PlayerAchievementsTool};
pub use user_stats_for_game::{UserStatsForGameParams, UserStatsForGameTool};
