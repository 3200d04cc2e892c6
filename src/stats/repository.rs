use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{GameResult, NewGameResult, PlayState, StatsError};

/// Store of completed games.
///
/// Writes are assumed to be serialized by the implementation. Both queries return
/// games newest first.
#[async_trait]
pub trait GameResultRepository: Send + Sync {
    /// Stores a game and returns the id assigned to it.
    async fn insert(&self, record: &NewGameResult) -> Result<i64, StatsError>;
    async fn get_player_games(&self, player_name: &str) -> Result<Vec<GameResult>, StatsError>;
    async fn get_all_games(&self) -> Result<Vec<GameResult>, StatsError>;
}

fn newest_first(games: &mut [GameResult]) {
    games.sort_by(|a, b| {
        b.completed_at
            .cmp(&a.completed_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[derive(Debug, Default)]
struct InMemoryGames {
    next_id: i64,
    games: Vec<GameResult>,
}

/// In-memory implementation of GameResultRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryGameResultRepository {
    state: RwLock<InMemoryGames>,
}

impl InMemoryGameResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn game_count(&self) -> usize {
        self.state.read().await.games.len()
    }
}

#[async_trait]
impl GameResultRepository for InMemoryGameResultRepository {
    #[instrument(skip(self, record))]
    async fn insert(&self, record: &NewGameResult) -> Result<i64, StatsError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        state.games.push(GameResult::from_new(id, record));

        debug!(id, player_name = %record.player_name, "Game result stored in memory");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_player_games(&self, player_name: &str) -> Result<Vec<GameResult>, StatsError> {
        let state = self.state.read().await;
        let mut games: Vec<GameResult> = state
            .games
            .iter()
            .filter(|g| g.player_name == player_name)
            .cloned()
            .collect();
        newest_first(&mut games);

        debug!(count = games.len(), "Player games loaded from memory");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_all_games(&self) -> Result<Vec<GameResult>, StatsError> {
        let mut games = self.state.read().await.games.clone();
        newest_first(&mut games);

        debug!(count = games.len(), "All games loaded from memory");
        Ok(games)
    }
}

const SELECT_COLUMNS: &str = "SELECT id, player_name, completed_at, status, win_amount, \
     potential_amount, vaults_opened, total_rounds, stop_vault, is_jackpot FROM game_results";

/// SQLite implementation of GameResultRepository
pub struct SqliteGameResultRepository {
    pool: SqlitePool,
}

impl SqliteGameResultRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `game_results` table and its index if missing.
    #[instrument(skip(self))]
    pub async fn init(&self) -> Result<(), StatsError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS game_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_name TEXT NOT NULL,
                completed_at INTEGER NOT NULL,
                status INTEGER NOT NULL,
                win_amount INTEGER NOT NULL,
                potential_amount INTEGER NOT NULL,
                vaults_opened INTEGER NOT NULL,
                total_rounds INTEGER NOT NULL,
                stop_vault INTEGER NOT NULL,
                is_jackpot INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(store_error("create game_results table"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_game_results_player_name ON game_results (player_name)",
        )
        .execute(&self.pool)
        .await
        .map_err(store_error("create player_name index"))?;

        debug!("Game results schema ready");
        Ok(())
    }
}

fn store_error(action: &'static str) -> impl Fn(sqlx::Error) -> StatsError {
    move |e| {
        warn!(error = %e, action, "Game results query failed");
        StatsError::Repository(e.to_string())
    }
}

fn game_from_row(row: &SqliteRow) -> Result<GameResult, StatsError> {
    let id: i64 = row.get("id");
    let micros: i64 = row.get("completed_at");
    let code: i32 = row.get("status");

    let completed_at = DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| {
        StatsError::Repository(format!("game {id} has invalid completed_at {micros}"))
    })?;
    let status = PlayState::from_code(code)
        .ok_or_else(|| StatsError::Repository(format!("game {id} has unknown status {code}")))?;

    Ok(GameResult {
        id,
        player_name: row.get("player_name"),
        completed_at,
        status,
        win_amount: row.get("win_amount"),
        potential_amount: row.get("potential_amount"),
        vaults_opened: row.get("vaults_opened"),
        total_rounds: row.get("total_rounds"),
        stop_vault: row.get("stop_vault"),
        is_jackpot: row.get("is_jackpot"),
    })
}

#[async_trait]
impl GameResultRepository for SqliteGameResultRepository {
    #[instrument(skip(self, record))]
    async fn insert(&self, record: &NewGameResult) -> Result<i64, StatsError> {
        debug!(player_name = %record.player_name, "Inserting game result into database");

        let result = sqlx::query(
            "INSERT INTO game_results (player_name, completed_at, status, win_amount, \
             potential_amount, vaults_opened, total_rounds, stop_vault, is_jackpot) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.player_name)
        .bind(record.completed_at.timestamp_micros())
        .bind(record.status.code())
        .bind(record.win_amount)
        .bind(record.potential_amount)
        .bind(record.vaults_opened)
        .bind(record.total_rounds)
        .bind(record.stop_vault)
        .bind(record.is_jackpot)
        .execute(&self.pool)
        .await
        .map_err(store_error("insert game result"))?;

        let id = result.last_insert_rowid();
        debug!(id, "Game result inserted into database");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_player_games(&self, player_name: &str) -> Result<Vec<GameResult>, StatsError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE player_name = ? ORDER BY completed_at DESC, id DESC"
        ))
        .bind(player_name)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error("fetch player games"))?;

        let games = rows.iter().map(game_from_row).collect::<Result<Vec<_>, _>>()?;
        debug!(count = games.len(), "Player games loaded from database");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_all_games(&self) -> Result<Vec<GameResult>, StatsError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} ORDER BY completed_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error("fetch all games"))?;

        let games = rows.iter().map(game_from_row).collect::<Result<Vec<_>, _>>()?;
        debug!(count = games.len(), "All games loaded from database");
        Ok(games)
    }
}
