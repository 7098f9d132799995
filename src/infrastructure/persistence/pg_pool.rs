use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::application::ports::RepositoryError;

const CONNECT_ATTEMPTS: u32 = 6;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects with exponential backoff so the service survives a database
/// that comes up a little later than it does.
#[tracing::instrument(skip(url))]
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, RepositoryError> {
    let options = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT);

    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 1;
    loop {
        match options.clone().connect(url).await {
            Ok(pool) => {
                tracing::info!(attempt, max_connections, "PostgreSQL pool ready");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    backoff_ms = backoff.as_millis(),
                    "PostgreSQL connection failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            Err(e) => return Err(RepositoryError::ConnectionFailed(e.to_string())),
        }
    }
}

/// Applies the embedded migrations (users, summaries, cascade rule).
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(format!("migration failed: {e}")))
}
