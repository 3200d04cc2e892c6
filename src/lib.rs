// Library crate for the vault game stats service
// This file exposes the public API for integration tests

pub mod config;
pub mod shared;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use shared::{AppError, AppState};
pub use stats::{
    GameResult, GameResultRepository, InMemoryGameResultRepository, PlayState, PlayerStats,
    SaveGameResult, SqliteGameResultRepository, StatsCalculator, StatsError, StatsService,
};

/// Builds the HTTP router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/games", post(stats::save_game_result))
        .route("/leaderboard", get(stats::get_leaderboard))
        .route("/players/:player_name/stats", get(stats::get_player_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
