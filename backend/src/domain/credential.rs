//! Capability grants binding a user to a company or department.
//!
//! A credential is the triple `(credential_type, user_id, object_id)`. The
//! meaning of `object_id` depends on the type's scope: company-scoped types
//! point at a company, department-scoped types at a department.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CompanyId, DepartmentId, UserId};

/// Kind of capability granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    /// Full control over a company record.
    CompanyAdmin,
    /// Membership of a company; allows reading it.
    CompanyUser,
    /// Management of a department's membership.
    DepartmentAdmin,
    /// Membership of a department.
    DepartmentUser,
    /// Maintenance duties inside a department.
    DepartmentMaintainer,
}

/// Which entity a credential's `object_id` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    /// `object_id` is a [`CompanyId`].
    Company,
    /// `object_id` is a [`DepartmentId`].
    Department,
}

/// Raised when a stored credential type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid credentials type: {0}")]
pub struct UnknownCredentialType(pub String);

impl CredentialType {
    /// Every credential type, company-scoped first.
    pub const ALL: [Self; 5] = [
        Self::CompanyAdmin,
        Self::CompanyUser,
        Self::DepartmentAdmin,
        Self::DepartmentUser,
        Self::DepartmentMaintainer,
    ];

    /// Scope of the object this credential type is granted on.
    #[must_use]
    pub const fn scope(self) -> CredentialScope {
        match self {
            Self::CompanyAdmin | Self::CompanyUser => CredentialScope::Company,
            Self::DepartmentAdmin | Self::DepartmentUser | Self::DepartmentMaintainer => {
                CredentialScope::Department
            }
        }
    }

    /// Stable storage and wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompanyAdmin => "company_admin",
            Self::CompanyUser => "company_user",
            Self::DepartmentAdmin => "department_admin",
            Self::DepartmentUser => "department_user",
            Self::DepartmentMaintainer => "department_maintainer",
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = UnknownCredentialType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownCredentialType(s.to_owned()))
    }
}

/// A single capability grant.
///
/// # Examples
/// ```
/// use thing_repository::domain::{CompanyId, Credential, CredentialType, UserId};
///
/// let grant = Credential::on_company(CredentialType::CompanyAdmin, UserId::new(1), CompanyId::new(9));
/// assert!(grant.grants(CredentialType::CompanyAdmin, 9));
/// assert!(!grant.grants(CredentialType::CompanyUser, 9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Credential {
    /// Kind of capability.
    pub credential_type: CredentialType,
    /// Holder of the capability.
    pub user_id: UserId,
    /// Company or department id, depending on the type's scope.
    pub object_id: i64,
}

impl Credential {
    /// Grant a credential on a company.
    #[must_use]
    pub const fn on_company(
        credential_type: CredentialType,
        user_id: UserId,
        company_id: CompanyId,
    ) -> Self {
        Self {
            credential_type,
            user_id,
            object_id: company_id.get(),
        }
    }

    /// Grant a credential on a department.
    #[must_use]
    pub const fn on_department(
        credential_type: CredentialType,
        user_id: UserId,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            credential_type,
            user_id,
            object_id: department_id.get(),
        }
    }

    /// Whether this grant is `credential_type` on `object_id`.
    #[must_use]
    pub fn grants(&self, credential_type: CredentialType, object_id: i64) -> bool {
        self.credential_type == credential_type && self.object_id == object_id
    }
}

/// The four grants every company creator receives.
#[must_use]
pub fn founder_credentials(
    user_id: UserId,
    company_id: CompanyId,
    head_department_id: DepartmentId,
) -> [Credential; 4] {
    [
        Credential::on_company(CredentialType::CompanyAdmin, user_id, company_id),
        Credential::on_company(CredentialType::CompanyUser, user_id, company_id),
        Credential::on_department(CredentialType::DepartmentAdmin, user_id, head_department_id),
        Credential::on_department(CredentialType::DepartmentUser, user_id, head_department_id),
    ]
}

/// The two grants a user receives when joining a department.
#[must_use]
pub fn member_credentials(
    user_id: UserId,
    company_id: CompanyId,
    department_id: DepartmentId,
) -> [Credential; 2] {
    [
        Credential::on_department(CredentialType::DepartmentUser, user_id, department_id),
        Credential::on_company(CredentialType::CompanyUser, user_id, company_id),
    ]
}
