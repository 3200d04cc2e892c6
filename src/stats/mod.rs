pub mod calculator;
pub mod service;

mod errors;
mod handlers;
pub mod models;
pub mod repository;
pub mod types;

// Public API - what other modules can use
pub use calculator::StatsCalculator;
pub use errors::StatsError;
pub use handlers::{get_leaderboard, get_player_stats, save_game_result};
pub use models::*;
pub use repository::{GameResultRepository, InMemoryGameResultRepository, SqliteGameResultRepository};
pub use service::StatsService;
