//! Backend entry-point: loads configuration, prepares storage and serves HTTP.

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use thing_repository::config::{AppConfig, DatabaseSettings};
use thing_repository::inbound::http::health::HealthState;
use thing_repository::outbound::persistence::{
    DbPool, PoolConfig, RetryPolicy, connect_with_retry, run_migrations,
};
use thing_repository::server::{ServerConfig, create_server};

async fn prepare_database(database: &DatabaseSettings) -> Result<DbPool> {
    let url = database.url();
    let pool = connect_with_retry(PoolConfig::new(url), RetryPolicy::default())
        .await
        .wrap_err("connect to PostgreSQL")?;
    run_migrations(url).await.wrap_err("apply migrations")?;
    info!(host = %database.host, db = %database.db_name, "database ready");
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppConfig::load()
        .wrap_err("load configuration")?
        .settings()?;

    let mut config = ServerConfig::new(
        settings.bind_addr,
        settings.token_secret,
        settings.hash_salt,
    );
    match &settings.database {
        Some(database) => config = config.with_db_pool(prepare_database(database).await?),
        None => warn!("no PostgreSQL settings; using in-memory store"),
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await?;
    Ok(())
}
