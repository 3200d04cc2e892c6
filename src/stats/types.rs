use serde::{Deserialize, Serialize};

use super::{PlayState, SaveGameResult};

/// Request payload for recording a finished game
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveGameResultRequest {
    pub player_name: String,
    pub status: PlayState,
    pub win_amount: i32,
    pub potential_amount: i32,
    pub vaults_opened: i32,
    pub total_rounds: i32,
    #[serde(default)]
    pub stop_vault: i32,
    #[serde(default)]
    pub is_jackpot: bool,
}

impl From<SaveGameResultRequest> for SaveGameResult {
    fn from(request: SaveGameResultRequest) -> Self {
        Self {
            player_name: request.player_name,
            status: request.status,
            win_amount: request.win_amount,
            potential_amount: request.potential_amount,
            vaults_opened: request.vaults_opened,
            total_rounds: request.total_rounds,
            stop_vault: request.stop_vault,
            is_jackpot: request.is_jackpot,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SaveGameResultResponse {
    pub id: i64,
}

/// Query string for the leaderboard endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub top: Option<usize>, // falls back to the configured default
}
