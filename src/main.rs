use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultstats::{router, AppConfig, AppState, SqliteGameResultRepository};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaultstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!(database_url = %config.database_url, "Starting vault stats server");

    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await?;
    let repository = SqliteGameResultRepository::new(pool);
    repository.init().await?;

    let bind_addr = config.bind_addr.clone();
    let app = router(AppState::new(Arc::new(repository), config));

    // run our app with hyper
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server running on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
