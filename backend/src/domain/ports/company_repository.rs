//! Port abstraction for company persistence adapters.
use async_trait::async_trait;

use crate::domain::{Company, CompanyDraft, CompanyId, CompanyPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by company repository adapters.
    pub enum CompanyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "company repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "company repository query failed: {message}",
        /// Patch carried no fields to write.
        EmptyPatch => "company patch has no fields to change",
    }
}

/// Store of companies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a company and return it with its generated id.
    async fn insert(&self, draft: &CompanyDraft) -> Result<Company, CompanyRepositoryError>;

    /// Fetch a company by identifier.
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Write the present fields of `patch`. Updating a missing row is not an
    /// error.
    async fn update(&self, id: CompanyId, patch: &CompanyPatch)
    -> Result<(), CompanyRepositoryError>;

    /// Remove the company row. Rows that reference it are left in place.
    async fn delete(&self, id: CompanyId) -> Result<(), CompanyRepositoryError>;
}
