//! Company lifecycle with credential checks.
//!
//! Creating a company is the one multi-write workflow here: the company, its
//! head department, four founder grants and the founder's placement are
//! written in a single unit of work. Any early return drops the unit of work
//! and rolls everything back.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{CompanyCommand, CompanyQuery, CompanyRepository, TransactionManager};
use crate::domain::{
    AuthContext, Company, CompanyDraft, CompanyId, CompanyPatch, CredentialType,
    DepartmentDraft, ServiceError, UserPatch, founder_credentials,
};

/// Company service implementing the company driving ports.
#[derive(Clone)]
pub struct CompanyService<T, C> {
    transactions: Arc<T>,
    companies: Arc<C>,
}

impl<T, C> CompanyService<T, C> {
    /// Create a new service. `companies` serves single reads and writes
    /// outside a transaction.
    pub fn new(transactions: Arc<T>, companies: Arc<C>) -> Self {
        Self {
            transactions,
            companies,
        }
    }
}

#[async_trait]
impl<T, C> CompanyCommand for CompanyService<T, C>
where
    T: TransactionManager,
    C: CompanyRepository,
{
    async fn add_company(
        &self,
        ctx: &AuthContext,
        draft: CompanyDraft,
    ) -> Result<Company, ServiceError> {
        let user_id = ctx.user_id()?;
        let uow = self.transactions.begin().await?;

        let founder = uow
            .users()
            .find_by_id_for_update(user_id)
            .await
            .map_err(|error| {
                warn!(%error, %user_id, "failed to load company founder");
                ServiceError::GetUserDataFailed
            })?
            .ok_or(ServiceError::GetUserDataFailed)?;
        if founder.is_affiliated() {
            return Err(ServiceError::UserAlreadyHasCompany);
        }

        let company = uow.companies().insert(&draft).await?;
        let head = uow
            .departments()
            .insert(&DepartmentDraft::head_of(company.id))
            .await?;
        for grant in founder_credentials(user_id, company.id, head.id) {
            uow.credentials().create(&grant).await?;
        }
        uow.users()
            .patch(user_id, &UserPatch::placement(company.id, head.id))
            .await?;

        uow.commit().await?;
        debug!(company_id = %company.id, %user_id, "company created");
        Ok(company)
    }

    async fn update_company(
        &self,
        ctx: &AuthContext,
        patch: CompanyPatch,
        company_id: CompanyId,
    ) -> Result<Company, ServiceError> {
        ctx.require(CredentialType::CompanyAdmin, company_id.get())?;
        if patch.is_empty() {
            return Err(ServiceError::NoDataToChange);
        }
        self.companies.update(company_id, &patch).await?;
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or(ServiceError::CompanyNotFound)
    }

    async fn delete_company(
        &self,
        ctx: &AuthContext,
        company_id: CompanyId,
    ) -> Result<(), ServiceError> {
        ctx.require(CredentialType::CompanyAdmin, company_id.get())?;
        self.companies.delete(company_id).await?;
        debug!(%company_id, "company deleted");
        Ok(())
    }
}

#[async_trait]
impl<T, C> CompanyQuery for CompanyService<T, C>
where
    T: TransactionManager,
    C: CompanyRepository,
{
    async fn get_company(
        &self,
        ctx: &AuthContext,
        company_id: CompanyId,
    ) -> Result<Company, ServiceError> {
        ctx.require(CredentialType::CompanyUser, company_id.get())?;
        self.companies
            .find_by_id(company_id)
            .await?
            .ok_or(ServiceError::CompanyNotFound)
    }
}

#[cfg(test)]
#[path = "company_service_tests.rs"]
mod tests;
