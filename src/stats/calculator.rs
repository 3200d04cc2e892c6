use super::{GameResult, PlayState, PlayerStats};

/// Turns a player's game history into [`PlayerStats`].
///
/// Pure: no I/O, no state. Ratios are rounded half-to-even at one decimal place.
pub struct StatsCalculator;

impl StatsCalculator {
    /// `display_name` is copied into the result as given. Normalization is the
    /// caller's concern.
    pub fn calculate(display_name: &str, games: &[GameResult]) -> PlayerStats {
        if games.is_empty() {
            return PlayerStats {
                player_name: display_name.to_string(),
                ..PlayerStats::default()
            };
        }

        let games_played = games.len() as u32;
        let count = games.len() as f64;

        let total_won: i64 = games.iter().map(|g| i64::from(g.win_amount)).sum();
        let potential_winnings: i64 = games.iter().map(|g| i64::from(g.potential_amount)).sum();
        let jackpots_hit = count_where(games, GameResult::hit_jackpot);
        let times_busted = count_where(games, |g| g.status.is_loss());
        let times_stopped = count_where(games, |g| g.status == PlayState::WinStop);
        let best_single_game = games.iter().map(|g| g.win_amount).max().unwrap_or_default();

        let avg_vaults = games.iter().map(|g| f64::from(g.vaults_opened)).sum::<f64>() / count;
        let avg_total_rounds = games.iter().map(|g| f64::from(g.total_rounds)).sum::<f64>() / count;

        let not_lost = count_where(games, |g| !g.status.is_loss());
        let win_rate = f64::from(not_lost) / count * 100.0;

        let money_left_on_table: i64 = games.iter().map(GameResult::money_left_on_table).sum();

        // Unrounded averages so the ratio doesn't compound rounding error
        let risk_score = if avg_total_rounds > 0.0 {
            avg_vaults / avg_total_rounds * 100.0
        } else {
            0.0
        };

        PlayerStats {
            player_name: display_name.to_string(),
            games_played,
            total_won,
            potential_winnings,
            jackpots_hit,
            times_busted,
            times_stopped,
            best_single_game,
            avg_vaults_per_game: round1(avg_vaults),
            win_rate: round1(win_rate),
            longest_streak: longest_streak(games),
            money_left_on_table,
            risk_score: round1(risk_score),
        }
    }
}

/// Longest run of consecutive non-losing games, replayed oldest first.
///
/// Games sharing a timestamp keep their input order.
pub fn longest_streak(games: &[GameResult]) -> u32 {
    let mut ordered: Vec<&GameResult> = games.iter().collect();
    ordered.sort_by_key(|g| g.completed_at);

    let mut best = 0;
    let mut current = 0;
    for game in ordered {
        if game.status.is_loss() {
            current = 0;
        } else {
            current += 1;
            best = best.max(current);
        }
    }
    best
}

fn count_where(games: &[GameResult], predicate: impl Fn(&GameResult) -> bool) -> u32 {
    games.iter().filter(|&g| predicate(g)).count() as u32
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
