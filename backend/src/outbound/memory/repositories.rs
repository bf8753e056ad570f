//! Port implementations over [`super::MemoryState`].

use async_trait::async_trait;

use super::{Access, Fault};
use crate::domain::ports::{
    CompanyRepository, CompanyRepositoryError, CredentialRepository, CredentialRepositoryError,
    DepartmentRepository, DepartmentRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Company, CompanyDraft, CompanyId, CompanyPatch, Credential, CredentialScope, Department,
    DepartmentDraft, DepartmentId, NewUser, User, UserId, UserPatch, UserRecord,
};

const INJECTED: &str = "injected failure";

macro_rules! memory_repository {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            access: Access,
        }

        impl $name {
            pub(crate) fn new(access: Access) -> Self {
                Self { access }
            }
        }
    };
}

memory_repository! {
    /// In-memory `UserRepository`.
    MemoryUserRepository
}

memory_repository! {
    /// In-memory `CompanyRepository`.
    MemoryCompanyRepository
}

memory_repository! {
    /// In-memory `DepartmentRepository`.
    MemoryDepartmentRepository
}

memory_repository! {
    /// In-memory `CredentialRepository`.
    MemoryCredentialRepository
}

fn matches_filter(user: &User, needle: &str) -> bool {
    [&user.first_name, &user.last_name, &user.email]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserRepositoryError> {
        Ok(self
            .access
            .with_state(|state| {
                state
                    .users
                    .values()
                    .find(|record| record.profile.email == email)
                    .cloned()
            })
            .await)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .access
            .with_state(|state| {
                state
                    .users
                    .get(&id.get())
                    .map(|record| record.profile.clone())
            })
            .await)
    }

    async fn find_by_id_for_update(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        // The transaction already holds the store lock.
        self.find_by_id(id).await
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        if self.access.should_fail(Fault::UserInsert) {
            return Err(UserRepositoryError::query(INJECTED));
        }
        self.access
            .with_state(|state| {
                let email = user.email.as_ref();
                if state
                    .users
                    .values()
                    .any(|record| record.profile.email == email)
                {
                    return Err(UserRepositoryError::duplicate_email(email));
                }
                let id = state.next_id();
                let profile = User {
                    id: UserId::new(id),
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    email: email.to_owned(),
                    image_url: None,
                    company_id: None,
                    department_id: None,
                    email_is_validated: false,
                    vacation_time_start: None,
                    vacation_time_end: None,
                };
                state.users.insert(
                    id,
                    UserRecord {
                        profile: profile.clone(),
                        password_hash: user.password_hash.clone(),
                        email_validation_token: None,
                    },
                );
                Ok(profile)
            })
            .await
    }

    async fn patch(&self, id: UserId, patch: &UserPatch) -> Result<(), UserRepositoryError> {
        if patch.is_empty() {
            return Err(UserRepositoryError::empty_patch());
        }
        if self.access.should_fail(Fault::UserPatch) {
            return Err(UserRepositoryError::query(INJECTED));
        }
        self.access
            .with_state(|state| {
                if let Some(record) = state.users.get_mut(&id.get()) {
                    let profile = &mut record.profile;
                    if let Some(first_name) = &patch.first_name {
                        profile.first_name.clone_from(first_name);
                    }
                    if let Some(last_name) = &patch.last_name {
                        profile.last_name.clone_from(last_name);
                    }
                    if let Some(image_url) = &patch.image_url {
                        profile.image_url = Some(image_url.clone());
                    }
                    if let Some(placement) = patch.placement {
                        profile.company_id = Some(placement.company_id);
                        profile.department_id = Some(placement.department_id);
                    }
                }
            })
            .await;
        Ok(())
    }

    async fn search_unaffiliated(
        &self,
        filter: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let needle = filter.to_lowercase();
        let skip = usize::try_from(offset).unwrap_or(0);
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .access
            .with_state(|state| {
                state
                    .users
                    .values()
                    .map(|record| &record.profile)
                    .filter(|user| user.company_id.is_none())
                    .filter(|user| matches_filter(user, &needle))
                    .skip(skip)
                    .take(take)
                    .cloned()
                    .collect()
            })
            .await)
    }
}

#[async_trait]
impl CompanyRepository for MemoryCompanyRepository {
    async fn insert(&self, draft: &CompanyDraft) -> Result<Company, CompanyRepositoryError> {
        if self.access.should_fail(Fault::CompanyInsert) {
            return Err(CompanyRepositoryError::query(INJECTED));
        }
        Ok(self
            .access
            .with_state(|state| {
                let id = state.next_id();
                let company = Company {
                    id: CompanyId::new(id),
                    company_name: draft.company_name.clone(),
                    address: draft.address.clone(),
                    image_url: None,
                };
                state.companies.insert(id, company.clone());
                company
            })
            .await)
    }

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        Ok(self
            .access
            .with_state(|state| state.companies.get(&id.get()).cloned())
            .await)
    }

    async fn update(
        &self,
        id: CompanyId,
        patch: &CompanyPatch,
    ) -> Result<(), CompanyRepositoryError> {
        if patch.is_empty() {
            return Err(CompanyRepositoryError::empty_patch());
        }
        self.access
            .with_state(|state| {
                if let Some(company) = state.companies.get_mut(&id.get()) {
                    if let Some(name) = &patch.company_name {
                        company.company_name.clone_from(name);
                    }
                    if let Some(address) = &patch.address {
                        company.address.clone_from(address);
                    }
                    if let Some(image_url) = &patch.image_url {
                        company.image_url = Some(image_url.clone());
                    }
                }
            })
            .await;
        Ok(())
    }

    async fn delete(&self, id: CompanyId) -> Result<(), CompanyRepositoryError> {
        self.access
            .with_state(|state| state.companies.remove(&id.get()))
            .await;
        Ok(())
    }
}

#[async_trait]
impl DepartmentRepository for MemoryDepartmentRepository {
    async fn insert(
        &self,
        draft: &DepartmentDraft,
    ) -> Result<Department, DepartmentRepositoryError> {
        if self.access.should_fail(Fault::DepartmentInsert) {
            return Err(DepartmentRepositoryError::query(INJECTED));
        }
        Ok(self
            .access
            .with_state(|state| {
                let id = state.next_id();
                let department = Department {
                    id: DepartmentId::new(id),
                    department_name: draft.department_name.clone(),
                    company_id: draft.company_id,
                    image_url: None,
                };
                state.departments.insert(id, department.clone());
                department
            })
            .await)
    }

    async fn find_by_id(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>, DepartmentRepositoryError> {
        Ok(self
            .access
            .with_state(|state| state.departments.get(&id.get()).cloned())
            .await)
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn create(&self, credential: &Credential) -> Result<i64, CredentialRepositoryError> {
        if self.access.should_fail(Fault::CredentialCreate) {
            return Err(CredentialRepositoryError::query(INJECTED));
        }
        Ok(self
            .access
            .with_state(|state| {
                let id = state.next_id();
                state.credentials.push((id, *credential));
                id
            })
            .await)
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Credential>, CredentialRepositoryError> {
        Ok(self
            .access
            .with_state(|state| {
                let (mut company, department): (Vec<Credential>, Vec<Credential>) = state
                    .credentials
                    .iter()
                    .map(|(_, credential)| *credential)
                    .filter(|credential| credential.user_id == user_id)
                    .partition(|credential| {
                        credential.credential_type.scope() == CredentialScope::Company
                    });
                company.extend(department);
                company
            })
            .await)
    }
}
