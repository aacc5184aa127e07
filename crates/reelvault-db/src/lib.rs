//! Database layer: connection setup, migrations, and the video repository.

mod video;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

pub use video::{VideoRepository, VideoStore};

const DB_MAX_CONNECTIONS: u32 = 20;
const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Connect to Postgres with the service's pool settings.
pub async fn connect(database_url: &str) -> Result<PgPool, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(DB_MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(DB_ACQUIRE_TIMEOUT_SECS))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections = DB_MAX_CONNECTIONS, "Database pool ready");
    Ok(pool)
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
