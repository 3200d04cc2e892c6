use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use vaultstats::{
    router, AppConfig, AppState, GameResultRepository, InMemoryGameResultRepository,
    SqliteGameResultRepository,
};

use super::actions::GameRequest;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub repository: Arc<dyn GameResultRepository>,
}

pub struct TestSetupBuilder {
    config: AppConfig,
    sqlite: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            sqlite: false,
        }
    }

    pub fn with_leaderboard_top_n(mut self, top_n: usize) -> Self {
        self.config.leaderboard_top_n = top_n;
        self
    }

    /// Backs the app with an in-memory SQLite database instead of the plain in-memory store
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    pub async fn build(self) -> TestSetup {
        let repository: Arc<dyn GameResultRepository> = if self.sqlite {
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await
                .unwrap();
            let repo = SqliteGameResultRepository::new(pool);
            repo.init().await.unwrap();
            Arc::new(repo)
        } else {
            Arc::new(InMemoryGameResultRepository::new())
        };

        let app = router(AppState::new(repository.clone(), self.config));
        TestSetup { app, repository }
    }
}

impl TestSetup {
    pub async fn save(&self, game: GameRequest) -> i64 {
        let (status, body) = self.post_json("/games", &game.to_json()).await;
        assert_eq!(status, StatusCode::OK, "saving game failed: {body}");
        body["id"].as_i64().expect("response should carry an id")
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn get_as<T: DeserializeOwned>(&self, uri: &str) -> T {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "GET {uri} failed: {body}");
        serde_json::from_value(body).unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()));
        (status, body)
    }
}
