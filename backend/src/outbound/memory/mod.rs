//! In-memory adapters for every persistence port.
//!
//! Used when no PostgreSQL settings are configured and by the test suites.
//! Transactions are serialised: `begin` holds the store lock until the unit
//! of work finishes, and writes go to a private copy that `commit` swaps in.
//! Dropping an unfinished unit of work discards the copy.
//!
//! [`MemoryStore::inject_fault`] arms a one-shot failure for a chosen write
//! so atomicity can be exercised without a database.

mod repositories;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::ports::{
    CompanyRepository, CredentialRepository, DepartmentRepository, TransactionManager,
    UnitOfWork, UnitOfWorkError, UserRepository,
};
use crate::domain::{Company, Credential, Department, UserRecord};

pub use repositories::{
    MemoryCompanyRepository, MemoryCredentialRepository, MemoryDepartmentRepository,
    MemoryUserRepository,
};

/// Writes that can be made to fail once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    UserInsert,
    UserPatch,
    CompanyInsert,
    DepartmentInsert,
    CredentialCreate,
    Commit,
}

/// Row counts, for asserting that nothing leaked out of a failed workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub users: usize,
    pub companies: usize,
    pub departments: usize,
    pub credentials: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    pub(crate) users: BTreeMap<i64, UserRecord>,
    pub(crate) companies: BTreeMap<i64, Company>,
    pub(crate) departments: BTreeMap<i64, Department>,
    pub(crate) credentials: Vec<(i64, Credential)>,
    last_id: i64,
}

impl MemoryState {
    /// Ids are shared across tables, like one sequence per database.
    pub(crate) fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Root handle; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    faults: Arc<StdMutex<Vec<Fault>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next occurrence of `fault` with a query error.
    pub fn inject_fault(&self, fault: Fault) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(fault);
    }

    /// Current committed row counts.
    pub async fn stats(&self) -> MemoryStats {
        let state = self.state.lock().await;
        MemoryStats {
            users: state.users.len(),
            companies: state.companies.len(),
            departments: state.departments.len(),
            credentials: state.credentials.len(),
        }
    }

    /// Users outside any transaction.
    pub fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository::new(self.access())
    }

    /// Companies outside any transaction.
    pub fn companies(&self) -> MemoryCompanyRepository {
        MemoryCompanyRepository::new(self.access())
    }

    /// Departments outside any transaction.
    pub fn departments(&self) -> MemoryDepartmentRepository {
        MemoryDepartmentRepository::new(self.access())
    }

    /// Credentials outside any transaction.
    pub fn credentials(&self) -> MemoryCredentialRepository {
        MemoryCredentialRepository::new(self.access())
    }

    /// Transaction manager over this store.
    pub fn transactions(&self) -> MemoryTransactionManager {
        MemoryTransactionManager {
            store: self.clone(),
        }
    }

    fn access(&self) -> Access {
        Access {
            target: Target::Committed(Arc::clone(&self.state)),
            faults: Arc::clone(&self.faults),
        }
    }

    fn take_fault(faults: &StdMutex<Vec<Fault>>, fault: Fault) -> bool {
        let mut armed = faults.lock().unwrap_or_else(PoisonError::into_inner);
        match armed.iter().position(|candidate| *candidate == fault) {
            Some(index) => {
                armed.swap_remove(index);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone)]
enum Target {
    Committed(Arc<Mutex<MemoryState>>),
    Working(Arc<StdMutex<MemoryState>>),
}

/// How a repository reaches its data.
#[derive(Clone)]
pub(crate) struct Access {
    target: Target,
    faults: Arc<StdMutex<Vec<Fault>>>,
}

impl Access {
    pub(crate) async fn with_state<R>(&self, f: impl FnOnce(&mut MemoryState) -> R) -> R {
        match &self.target {
            Target::Committed(state) => f(&mut *state.lock().await),
            Target::Working(state) => f(&mut state.lock().unwrap_or_else(PoisonError::into_inner)),
        }
    }

    /// Whether an armed `fault` should fire now. Consumes it.
    pub(crate) fn should_fail(&self, fault: Fault) -> bool {
        MemoryStore::take_fault(&self.faults, fault)
    }
}

/// Serialising transaction manager for [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryTransactionManager {
    store: MemoryStore,
}

#[async_trait]
impl TransactionManager for MemoryTransactionManager {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, UnitOfWorkError> {
        let guard = Arc::clone(&self.store.state).lock_owned().await;
        let working = Arc::new(StdMutex::new(guard.clone()));
        let access = Access {
            target: Target::Working(Arc::clone(&working)),
            faults: Arc::clone(&self.store.faults),
        };
        Ok(Box::new(MemoryUnitOfWork {
            users: MemoryUserRepository::new(access.clone()),
            companies: MemoryCompanyRepository::new(access.clone()),
            departments: MemoryDepartmentRepository::new(access.clone()),
            credentials: MemoryCredentialRepository::new(access),
            working,
            guard,
            faults: Arc::clone(&self.store.faults),
            finished: false,
        }))
    }
}

/// Unit of work holding the store lock and a private working copy.
pub struct MemoryUnitOfWork {
    users: MemoryUserRepository,
    companies: MemoryCompanyRepository,
    departments: MemoryDepartmentRepository,
    credentials: MemoryCredentialRepository,
    working: Arc<StdMutex<MemoryState>>,
    guard: OwnedMutexGuard<MemoryState>,
    faults: Arc<StdMutex<Vec<Fault>>>,
    finished: bool,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
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
        if MemoryStore::take_fault(&self.faults, Fault::Commit) {
            return Err(UnitOfWorkError::transaction("injected commit failure"));
        }
        let working = std::mem::take(
            &mut *self
                .working
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        *self.guard = working;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), UnitOfWorkError> {
        self.finished = true;
        Ok(())
    }
}

impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        if !self.finished {
            debug!("unit of work dropped without commit; discarding writes");
        }
    }
}

#[cfg(test)]
mod tests;
