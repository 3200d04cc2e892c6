use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{
    calculator::StatsCalculator, normalize_player_name, repository::GameResultRepository,
    GameResult, NewGameResult, PlayerStats, SaveGameResult, StatsError,
};

/// Records finished games and answers leaderboard and per-player queries.
///
/// Holds no state of its own. Every query recomputes stats from the store.
pub struct StatsService {
    repository: Arc<dyn GameResultRepository>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn GameResultRepository>) -> Self {
        Self { repository }
    }

    /// Normalizes the player name, stamps the completion time and stores the game.
    #[instrument(skip(self, command), fields(player_name = %command.player_name))]
    pub async fn save_game_result(&self, command: SaveGameResult) -> Result<i64, StatsError> {
        let player_name = normalize_player_name(&command.player_name);
        if player_name.is_empty() {
            return Err(StatsError::Validation(
                "player name must not be blank".to_string(),
            ));
        }

        let record = NewGameResult {
            player_name,
            completed_at: chrono::Utc::now(),
            status: command.status,
            win_amount: command.win_amount,
            potential_amount: command.potential_amount,
            vaults_opened: command.vaults_opened,
            total_rounds: command.total_rounds,
            stop_vault: command.stop_vault,
            is_jackpot: command.is_jackpot,
        };

        let id = self.repository.insert(&record).await?;

        info!(
            id,
            player = %command.player_name,
            status = %command.status,
            win_amount = command.win_amount,
            "Saved game result"
        );
        Ok(id)
    }

    /// Ranks every player by total won, then win rate, then fewest games played.
    ///
    /// Entries are named by their normalized key since display casing is not stored.
    #[instrument(skip(self))]
    pub async fn get_leaderboard(&self, top_n: usize) -> Result<Vec<PlayerStats>, StatsError> {
        let all_games = self.repository.get_all_games().await?;
        debug!(count = all_games.len(), "Loaded total games for leaderboard");

        if all_games.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let mut by_player: BTreeMap<String, Vec<GameResult>> = BTreeMap::new();
        for game in all_games {
            by_player
                .entry(game.player_name.clone())
                .or_default()
                .push(game);
        }

        let mut leaderboard: Vec<PlayerStats> = by_player
            .iter()
            .map(|(player_name, games)| StatsCalculator::calculate(player_name, games))
            .collect();

        rank(&mut leaderboard);
        leaderboard.truncate(top_n);

        Ok(leaderboard)
    }

    /// Looks a player up by any casing of their name. `Ok(None)` means they never played.
    ///
    /// The returned stats carry `player_name` exactly as passed in.
    #[instrument(skip(self))]
    pub async fn get_player_stats(
        &self,
        player_name: &str,
    ) -> Result<Option<PlayerStats>, StatsError> {
        let key = normalize_player_name(player_name);
        let games = self.repository.get_player_games(&key).await?;

        if games.is_empty() {
            debug!(player = %player_name, "No games found for player");
            return Ok(None);
        }

        Ok(Some(StatsCalculator::calculate(player_name, &games)))
    }
}

/// Sorts best first: total won desc, win rate desc, games played asc.
pub fn rank(stats: &mut [PlayerStats]) {
    stats.sort_by(|a, b| {
        b.total_won
            .cmp(&a.total_won)
            .then_with(|| b.win_rate.total_cmp(&a.win_rate))
            .then_with(|| a.games_played.cmp(&b.games_played))
    });
}
