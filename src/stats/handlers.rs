use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::StatsService,
    types::{LeaderboardQuery, SaveGameResultRequest, SaveGameResultResponse},
    PlayerStats,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for recording a finished game
///
/// POST /games
/// Returns the id the store assigned to the game
#[instrument(name = "save_game_result", skip(state, request))]
pub async fn save_game_result(
    State(state): State<AppState>,
    Json(request): Json<SaveGameResultRequest>,
) -> Result<Json<SaveGameResultResponse>, AppError> {
    let service = StatsService::new(Arc::clone(&state.game_result_repository));
    let id = service.save_game_result(request.into()).await?;

    Ok(Json(SaveGameResultResponse { id }))
}

/// HTTP handler for the leaderboard
///
/// GET /leaderboard?top=N
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<PlayerStats>>, AppError> {
    let top_n = query.top.unwrap_or(state.config.leaderboard_top_n);

    let service = StatsService::new(Arc::clone(&state.game_result_repository));
    let leaderboard = service.get_leaderboard(top_n).await?;

    info!(top_n, entries = leaderboard.len(), "Leaderboard built");
    Ok(Json(leaderboard))
}

/// HTTP handler for a single player's stats
///
/// GET /players/:player_name/stats
/// Returns 404 when the player has never played
#[instrument(name = "get_player_stats", skip(state))]
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(player_name): Path<String>,
) -> Result<Json<PlayerStats>, AppError> {
    let service = StatsService::new(Arc::clone(&state.game_result_repository));

    service
        .get_player_stats(&player_name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No games found for player {player_name}")))
}
