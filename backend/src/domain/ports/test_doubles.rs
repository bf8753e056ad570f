//! Unit-of-work double assembled from mocked repositories.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{
    CompanyRepository, CredentialRepository, DepartmentRepository, MockCompanyRepository,
    MockCredentialRepository, MockDepartmentRepository, MockTransactionManager,
    MockUserRepository, UnitOfWork, UnitOfWorkError, UserRepository,
};

/// How a [`RecordingUnitOfWork`] was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Committed,
    RolledBack,
    /// Dropped without commit or rollback.
    Abandoned,
}

/// Reads the outcome after the unit of work has been moved into a service.
#[derive(Debug, Clone, Default)]
pub struct OutcomeLog(Arc<Mutex<Option<Outcome>>>);

impl OutcomeLog {
    pub fn outcome(&self) -> Option<Outcome> {
        *self.0.lock().expect("outcome lock poisoned")
    }

    fn record(&self, outcome: Outcome) {
        let mut slot = self.0.lock().expect("outcome lock poisoned");
        slot.get_or_insert(outcome);
    }
}

#[derive(Default)]
pub struct RecordingUnitOfWork {
    pub users: MockUserRepository,
    pub companies: MockCompanyRepository,
    pub departments: MockDepartmentRepository,
    pub credentials: MockCredentialRepository,
    outcome_log: OutcomeLog,
}

impl RecordingUnitOfWork {
    pub fn outcome_log(&self) -> OutcomeLog {
        self.outcome_log.clone()
    }

    /// Wrap `self` in a transaction manager expecting exactly one `begin`.
    pub fn into_manager(self) -> MockTransactionManager {
        let boxed: Box<dyn UnitOfWork> = Box::new(self);
        let mut manager = MockTransactionManager::new();
        manager
            .expect_begin()
            .times(1)
            .return_once(move || Ok(boxed));
        manager
    }
}

impl Drop for RecordingUnitOfWork {
    fn drop(&mut self) {
        self.outcome_log.record(Outcome::Abandoned);
    }
}

#[async_trait]
impl UnitOfWork for RecordingUnitOfWork {
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

    async fn commit(self: Box<Self>) -> Result<(), UnitOfWorkError> {
        self.outcome_log.record(Outcome::Committed);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), UnitOfWorkError> {
        self.outcome_log.record(Outcome::RolledBack);
        Ok(())
    }
}

/// Manager whose `begin` must never be called.
pub fn idle_manager() -> MockTransactionManager {
    let mut manager = MockTransactionManager::new();
    manager.expect_begin().never();
    manager
}
