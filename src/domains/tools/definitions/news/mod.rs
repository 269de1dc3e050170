pub mod game_news;

pub use game_news::{GameNewsParams, GameNewsTool};
