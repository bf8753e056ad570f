//! Driving port for placing users into companies.

use async_trait::async_trait;

use crate::domain::{AuthContext, DepartmentId, ServiceError, UserId};

/// Domain use-case port for company membership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipCommand: Send + Sync {
    /// Place `user_id` into `department_id` and its company.
    ///
    /// The caller needs both `company_admin` on the company and
    /// `department_admin` on the department.
    async fn add_user_to_company(
        &self,
        ctx: &AuthContext,
        user_id: UserId,
        department_id: DepartmentId,
    ) -> Result<(), ServiceError>;
}
