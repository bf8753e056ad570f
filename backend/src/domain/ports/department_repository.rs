//! Port abstraction for department persistence adapters.
use async_trait::async_trait;

use crate::domain::{Department, DepartmentDraft, DepartmentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by department repository adapters.
    pub enum DepartmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "department repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "department repository query failed: {message}",
    }
}

/// Store of departments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Insert a department and return it with its generated id.
    async fn insert(&self, draft: &DepartmentDraft)
    -> Result<Department, DepartmentRepositoryError>;

    /// Fetch a department by identifier.
    async fn find_by_id(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>, DepartmentRepositoryError>;
}
