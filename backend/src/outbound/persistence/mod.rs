//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository and transaction ports backed
//! by PostgreSQL through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One repository, two executors**: each repository runs either on a
//!   fresh pooled connection or on the shared connection of an open
//!   transaction.
//!
//! # Example
//!
//! ```ignore
//! use thing_repository::outbound::persistence::{
//!     DbPool, DieselTransactionManager, PoolConfig, RetryPolicy, connect_with_retry,
//! };
//!
//! let pool = connect_with_retry(PoolConfig::new(url), RetryPolicy::default()).await?;
//! let transactions = DieselTransactionManager::new(pool.clone());
//! ```

mod connect;
pub(crate) mod diesel_helpers;
mod diesel_company_repository;
mod diesel_credential_repository;
mod diesel_transaction_manager;
mod diesel_user_repository;
mod executor;
mod models;
mod pool;
mod schema;

pub use connect::{ConnectError, MIGRATIONS, RetryPolicy, connect_with_retry, run_migrations};
pub use diesel_company_repository::{DieselCompanyRepository, DieselDepartmentRepository};
pub use diesel_credential_repository::DieselCredentialRepository;
pub use diesel_transaction_manager::{DieselTransactionManager, DieselUnitOfWork};
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, OwnedConnection, PoolConfig, PoolError};
