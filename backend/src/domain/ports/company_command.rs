//! Driving port for company mutations.

use async_trait::async_trait;

use crate::domain::{AuthContext, Company, CompanyDraft, CompanyId, CompanyPatch, ServiceError};

/// Domain use-case port for creating, changing and removing companies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyCommand: Send + Sync {
    /// Create a company owned by the acting user.
    async fn add_company(
        &self,
        ctx: &AuthContext,
        draft: CompanyDraft,
    ) -> Result<Company, ServiceError>;

    /// Apply `patch` and return the stored company. Needs `company_admin`.
    async fn update_company(
        &self,
        ctx: &AuthContext,
        patch: CompanyPatch,
        company_id: CompanyId,
    ) -> Result<Company, ServiceError>;

    /// Remove a company. Needs `company_admin`.
    async fn delete_company(
        &self,
        ctx: &AuthContext,
        company_id: CompanyId,
    ) -> Result<(), ServiceError>;
}
