//! Port abstraction for credential persistence adapters.
//!
//! Adapters route each grant to the company or department table according to
//! [`crate::domain::CredentialType::scope`].
use async_trait::async_trait;

use crate::domain::{Credential, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by credential repository adapters.
    pub enum CredentialRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "credential repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "credential repository query failed: {message}",
    }
}

/// Store of capability grants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Persist a grant and return its row id. Duplicates are stored again.
    async fn create(&self, credential: &Credential) -> Result<i64, CredentialRepositoryError>;

    /// Every grant held by `user_id`, company-scoped first.
    async fn list_by_user(&self, user_id: UserId)
    -> Result<Vec<Credential>, CredentialRepositoryError>;
}
