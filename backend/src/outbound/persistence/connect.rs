//! Start-up connection with retries, followed by embedded migrations.

use std::time::Duration;

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

use super::pool::{DbPool, PoolConfig, PoolError};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How often and how patiently to try reaching the database at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total connection attempts, including the first.
    pub attempts: u32,
    /// Pause between failed attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

/// Errors raised while preparing the database.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Every attempt to reach the database failed.
    #[error("database unreachable after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: PoolError,
    },
    /// Migrations could not be applied.
    #[error("failed to run migrations: {message}")]
    Migration { message: String },
}

/// Build the pool and prove it can hand out a connection, retrying per
/// `policy`.
pub async fn connect_with_retry(
    config: PoolConfig,
    policy: RetryPolicy,
) -> Result<DbPool, ConnectError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match try_connect(config.clone()).await {
            Ok(pool) => {
                info!(attempt, "connected to database");
                return Ok(pool);
            }
            Err(source) if attempt >= attempts => {
                return Err(ConnectError::Unreachable { attempts, source });
            }
            Err(error) => {
                warn!(%error, attempt, "database not ready; retrying");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

async fn try_connect(config: PoolConfig) -> Result<DbPool, PoolError> {
    let pool = DbPool::new(config).await?;
    drop(pool.get().await?);
    Ok(pool)
}

/// Apply pending migrations on a dedicated blocking connection.
pub async fn run_migrations(database_url: &str) -> Result<(), ConnectError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || -> Result<(), ConnectError> {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| ConnectError::Migration {
                message: err.to_string(),
            })?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| ConnectError::Migration {
                message: err.to_string(),
            })?;
        info!(applied = applied.len(), "migrations up to date");
        Ok(())
    })
    .await
    .map_err(|err| ConnectError::Migration {
        message: err.to_string(),
    })?
}
