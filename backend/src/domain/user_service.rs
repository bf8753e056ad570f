//! Invite directory and company membership.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    DirectoryPage, MembershipCommand, TransactionManager, UserDirectoryQuery, UserRepository,
};
use crate::domain::{
    AuthContext, CredentialType, DepartmentId, ServiceError, User, UserId, UserPatch,
    member_credentials,
};

/// Largest page the invite directory returns.
pub const MAX_DIRECTORY_PAGE: i64 = 100;

/// User service implementing the directory and membership driving ports.
#[derive(Clone)]
pub struct UserService<T, U> {
    transactions: Arc<T>,
    users: Arc<U>,
}

impl<T, U> UserService<T, U> {
    /// Create a new service. `users` serves directory reads outside a
    /// transaction.
    pub fn new(transactions: Arc<T>, users: Arc<U>) -> Self {
        Self {
            transactions,
            users,
        }
    }
}

fn normalise_page(page: DirectoryPage) -> Result<DirectoryPage, ServiceError> {
    if page.offset < 0 {
        return Err(ServiceError::invalid_input("offset must not be negative"));
    }
    Ok(DirectoryPage {
        limit: page.limit.clamp(1, MAX_DIRECTORY_PAGE),
        offset: page.offset,
    })
}

#[async_trait]
impl<T, U> UserDirectoryQuery for UserService<T, U>
where
    T: TransactionManager,
    U: UserRepository,
{
    async fn find_users_for_invite(
        &self,
        ctx: &AuthContext,
        filter: &str,
        page: DirectoryPage,
    ) -> Result<Vec<User>, ServiceError> {
        ctx.user_id()?;
        let page = normalise_page(page)?;
        let users = self
            .users
            .search_unaffiliated(filter.trim(), page.limit, page.offset)
            .await?;
        Ok(users)
    }
}

#[async_trait]
impl<T, U> MembershipCommand for UserService<T, U>
where
    T: TransactionManager,
    U: UserRepository,
{
    async fn add_user_to_company(
        &self,
        ctx: &AuthContext,
        user_id: UserId,
        department_id: DepartmentId,
    ) -> Result<(), ServiceError> {
        let uow = self.transactions.begin().await?;
        ctx.credentials()?;

        let department = uow
            .departments()
            .find_by_id(department_id)
            .await?
            .ok_or(ServiceError::DepartmentNotFound)?;
        let company_id = department.company_id;
        ctx.require(CredentialType::CompanyAdmin, company_id.get())?;
        ctx.require(CredentialType::DepartmentAdmin, department_id.get())?;

        let target = uow
            .users()
            .find_by_id_for_update(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;
        if target.is_affiliated() {
            return Err(ServiceError::UserAlreadyHasCompany);
        }

        uow.users()
            .patch(user_id, &UserPatch::placement(company_id, department_id))
            .await?;
        for grant in member_credentials(user_id, company_id, department_id) {
            uow.credentials().create(&grant).await?;
        }

        uow.commit().await?;
        debug!(%user_id, %company_id, %department_id, "user joined company");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
