//! Diesel-backed `TransactionManager` and its unit of work.
//!
//! `begin` takes an owned pooled connection, issues `BEGIN` and shares the
//! connection with four transaction-bound repositories. Dropping the unit of
//! work without finishing it spawns a `ROLLBACK` on the current tokio
//! runtime; the connection returns to the pool once that task completes.

use std::sync::Arc;

use async_trait::async_trait;
use diesel_async::{AnsiTransactionManager, TransactionManager as _};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::ports::{
    CompanyRepository, CredentialRepository, DepartmentRepository, TransactionManager,
    UnitOfWork, UnitOfWorkError, UserRepository,
};

use super::diesel_company_repository::{DieselCompanyRepository, DieselDepartmentRepository};
use super::diesel_credential_repository::DieselCredentialRepository;
use super::diesel_user_repository::DieselUserRepository;
use super::executor::SharedConnection;
use super::pool::DbPool;

/// Opens PostgreSQL transactions from the pool.
#[derive(Clone)]
pub struct DieselTransactionManager {
    pool: DbPool,
}

impl DieselTransactionManager {
    /// Create a manager drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for DieselTransactionManager {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, UnitOfWorkError> {
        let mut conn = self
            .pool
            .get_owned()
            .await
            .map_err(|err| UnitOfWorkError::connection(err.into_message()))?;
        AnsiTransactionManager::begin_transaction(&mut *conn)
            .await
            .map_err(|err| UnitOfWorkError::transaction(err.to_string()))?;

        let shared: SharedConnection = Arc::new(Mutex::new(conn));
        Ok(Box::new(DieselUnitOfWork {
            users: DieselUserRepository::in_transaction(Arc::clone(&shared)),
            companies: DieselCompanyRepository::in_transaction(Arc::clone(&shared)),
            departments: DieselDepartmentRepository::in_transaction(Arc::clone(&shared)),
            credentials: DieselCredentialRepository::in_transaction(Arc::clone(&shared)),
            conn: shared,
            finished: false,
        }))
    }
}

/// Repositories bound to one open PostgreSQL transaction.
pub struct DieselUnitOfWork {
    users: DieselUserRepository,
    companies: DieselCompanyRepository,
    departments: DieselDepartmentRepository,
    credentials: DieselCredentialRepository,
    conn: SharedConnection,
    finished: bool,
}

#[async_trait]
impl UnitOfWork for DieselUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn companies(&self) -> &dyn CompanyRepository {
        &self.companies
    }

    fn departments(&self) -> &dyn DepartmentRepository {
        &self.departments
    }

    fn credentials(&self) -> &dyn CredentialRepository {
        &self.credentials
    }

    async fn commit(mut self: Box<Self>) -> Result<(), UnitOfWorkError> {
        self.finished = true;
        let mut conn = self.conn.lock().await;
        AnsiTransactionManager::commit_transaction(&mut **conn)
            .await
            .map_err(|err| UnitOfWorkError::transaction(err.to_string()))
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), UnitOfWorkError> {
        self.finished = true;
        let mut conn = self.conn.lock().await;
        AnsiTransactionManager::rollback_transaction(&mut **conn)
            .await
            .map_err(|err| UnitOfWorkError::transaction(err.to_string()))
    }
}

impl Drop for DieselUnitOfWork {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let conn = Arc::clone(&self.conn);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("unit of work dropped without commit; rolling back");
                handle.spawn(async move {
                    let mut conn = conn.lock().await;
                    if let Err(error) = AnsiTransactionManager::rollback_transaction(&mut **conn).await
                    {
                        warn!(%error, "deferred rollback failed");
                    }
                });
            }
            Err(error) => {
                // The pool discards connections left inside a transaction.
                warn!(%error, "no runtime for deferred rollback");
            }
        }
    }
}
