//! Per-test PostgreSQL databases for the Diesel suites.
//!
//! Each [`PgContext`] owns an embedded cluster, a freshly created database
//! with the embedded migrations applied, and a Tokio runtime for driving the
//! async adapters. Raw SQL helpers go through the blocking `postgres` client
//! so they see only committed data and never nest inside the runtime.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip instead of failing when the cluster
//! cannot start.

use std::future::Future;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use thing_repository::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::pg_embed::test_cluster;

/// One migrated database plus the runtime the adapters run on.
///
/// Fields drop in declaration order: the pool goes before the runtime, and
/// the cluster stops last.
pub struct PgContext {
    pub pool: DbPool,
    pub database_url: String,
    runtime: Runtime,
    _cluster: TestCluster,
}

impl PgContext {
    /// Drive `future` to completion on the context runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "PgContext::block_on called from inside a runtime"
        );
        self.runtime.block_on(future)
    }

    /// A second pool on the same database.
    pub fn pool_with_max_size(&self, max_size: u32) -> DbPool {
        self.block_on(DbPool::new(
            PoolConfig::new(&self.database_url).with_max_size(max_size),
        ))
        .expect("pool builds")
    }

    /// Run `sql` on a fresh connection, outside any adapter transaction.
    pub fn execute(&self, sql: &str) -> Result<(), String> {
        let mut client = connect(&self.database_url)?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }

    /// Committed row count of `table`.
    pub fn count(&self, table: &str) -> i64 {
        let mut client = connect(&self.database_url).expect("count connection");
        client
            .query_one(format!("SELECT COUNT(*) FROM {table}").as_str(), &[])
            .map(|row| row.get::<_, i64>(0))
            .unwrap_or_else(|err| panic!("count {table}: {}", format_postgres_error(&err)))
    }
}

/// Fixture body: a ready context, or `None` when skipping is allowed.
pub fn pg_context() -> Option<PgContext> {
    match setup() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn setup() -> Result<PgContext, String> {
    let cluster = test_cluster()?;
    let db_name = format!("things_{}", Uuid::new_v4().simple());
    let mut admin = connect(&cluster.connection().database_url("postgres"))?;
    admin
        .batch_execute(&format!("CREATE DATABASE {db_name}"))
        .map_err(|err| format_postgres_error(&err))?;
    let database_url = cluster.connection().database_url(&db_name).to_string();

    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    runtime
        .block_on(run_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(&database_url).with_max_size(4)))
        .map_err(|err| err.to_string())?;

    Ok(PgContext {
        pool,
        database_url,
        runtime,
        _cluster: cluster,
    })
}

fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}

/// Whether `SKIP_TEST_CLUSTER` holds a truthy value.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Flatten a driver error, including the server's detail and hint.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
