//! Transaction boundary shared by multi-write workflows.
//!
//! A [`UnitOfWork`] hands out repositories bound to one open transaction.
//! Callers finish it with [`UnitOfWork::commit`] or
//! [`UnitOfWork::rollback`]; dropping it without doing either rolls the
//! transaction back on a best-effort basis and only logs failures.

use async_trait::async_trait;

use super::{
    CompanyRepository, CredentialRepository, DepartmentRepository, UserRepository,
    define_port_error,
};

define_port_error! {
    /// Errors raised while opening or finishing a transaction.
    pub enum UnitOfWorkError {
        /// No connection could be obtained for the transaction.
        Connection { message: String } => "transaction connection failed: {message}",
        /// `BEGIN`, `COMMIT` or `ROLLBACK` failed.
        Transaction { message: String } => "transaction failed: {message}",
    }
}

/// Repositories bound to a single open transaction.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Users inside this transaction.
    fn users(&self) -> &dyn UserRepository;

    /// Companies inside this transaction.
    fn companies(&self) -> &dyn CompanyRepository;

    /// Departments inside this transaction.
    fn departments(&self) -> &dyn DepartmentRepository;

    /// Credentials inside this transaction.
    fn credentials(&self) -> &dyn CredentialRepository;

    /// Make every write visible.
    async fn commit(self: Box<Self>) -> Result<(), UnitOfWorkError>;

    /// Discard every write.
    async fn rollback(self: Box<Self>) -> Result<(), UnitOfWorkError>;
}

/// Opens units of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Begin a transaction.
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, UnitOfWorkError>;
}
