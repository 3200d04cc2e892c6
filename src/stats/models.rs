use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, FromRepr};

/// Terminal state of a single vault game.
///
/// Stored as its integer code, so the discriminants must never be reordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(i32)]
pub enum PlayState {
    InProgress = 0,
    /// Reached the final vault and hit the jackpot
    Win = 1,
    /// Stopped voluntarily and banked the winnings
    WinStop = 2,
    /// Reached the final vault without a jackpot, or busted
    Lose = 3,
}

impl PlayState {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }

    pub fn is_loss(self) -> bool {
        matches!(self, PlayState::Lose)
    }
}

/// A completed game that has been normalized and timestamped but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGameResult {
    pub player_name: String, // normalized key, never display casing
    pub completed_at: DateTime<Utc>,
    pub status: PlayState,
    pub win_amount: i32,
    pub potential_amount: i32,
    pub vaults_opened: i32,
    pub total_rounds: i32,
    pub stop_vault: i32,
    pub is_jackpot: bool,
}

/// A stored game result. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: i64,
    pub player_name: String,
    pub completed_at: DateTime<Utc>,
    pub status: PlayState,
    pub win_amount: i32,
    pub potential_amount: i32,
    pub vaults_opened: i32,
    pub total_rounds: i32,
    pub stop_vault: i32,
    pub is_jackpot: bool,
}

impl GameResult {
    pub fn from_new(id: i64, record: &NewGameResult) -> Self {
        Self {
            id,
            player_name: record.player_name.clone(),
            completed_at: record.completed_at,
            status: record.status,
            win_amount: record.win_amount,
            potential_amount: record.potential_amount,
            vaults_opened: record.vaults_opened,
            total_rounds: record.total_rounds,
            stop_vault: record.stop_vault,
            is_jackpot: record.is_jackpot,
        }
    }

    /// A jackpot only counts when the game actually ended on it.
    pub fn hit_jackpot(&self) -> bool {
        self.is_jackpot && self.status == PlayState::Win
    }

    /// Winnings forgone by stopping early. Zero for anything but `WinStop`.
    pub fn money_left_on_table(&self) -> i64 {
        match self.status {
            PlayState::WinStop => i64::from(self.potential_amount) - i64::from(self.win_amount),
            _ => 0,
        }
    }
}

/// Outcome of a game as reported by the caller, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGameResult {
    pub player_name: String,
    pub status: PlayState,
    pub win_amount: i32,
    pub potential_amount: i32,
    pub vaults_opened: i32,
    pub total_rounds: i32,
    pub stop_vault: i32,
    pub is_jackpot: bool,
}

/// Aggregate statistics for one player. Derived on every query, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_name: String,
    pub games_played: u32,
    pub total_won: i64,
    pub potential_winnings: i64,
    pub jackpots_hit: u32,
    pub times_busted: u32,
    pub times_stopped: u32,
    pub best_single_game: i32,
    pub avg_vaults_per_game: f64,
    pub win_rate: f64,
    pub longest_streak: u32,
    pub money_left_on_table: i64,
    pub risk_score: f64,
}

/// Builds the storage key for a player identifier.
pub fn normalize_player_name(player_name: &str) -> String {
    player_name.trim().to_lowercase()
}
