//! Driving port for reading companies.

use async_trait::async_trait;

use crate::domain::{AuthContext, Company, CompanyId, ServiceError};

/// Domain use-case port for company reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyQuery: Send + Sync {
    /// Fetch a company. Needs `company_user` on it.
    async fn get_company(
        &self,
        ctx: &AuthContext,
        company_id: CompanyId,
    ) -> Result<Company, ServiceError>;
}
