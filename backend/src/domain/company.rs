//! Companies and their departments.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CompanyId, DepartmentId};

/// Name given to the department created alongside every company.
pub const HEAD_DEPARTMENT_NAME: &str = "Head";

/// A tenant organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    /// Stable identifier.
    pub id: CompanyId,
    /// Display name.
    #[schema(example = "Acme")]
    pub company_name: String,
    /// Postal address.
    #[schema(example = "1 Main St")]
    pub address: String,
    /// Logo location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields required to create a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDraft {
    /// Display name.
    pub company_name: String,
    /// Postal address.
    pub address: String,
}

/// Partial update of a company. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    /// New display name.
    pub company_name: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// New logo location.
    pub image_url: Option<String>,
}

impl CompanyPatch {
    /// True when no field would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none() && self.address.is_none() && self.image_url.is_none()
    }
}

/// An organisational unit inside a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Department {
    /// Stable identifier.
    pub id: DepartmentId,
    /// Display name.
    pub department_name: String,
    /// Owning company.
    pub company_id: CompanyId,
    /// Badge location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields required to create a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentDraft {
    /// Display name.
    pub department_name: String,
    /// Owning company.
    pub company_id: CompanyId,
}

impl DepartmentDraft {
    /// The root department every new company receives.
    #[must_use]
    pub fn head_of(company_id: CompanyId) -> Self {
        Self {
            department_name: HEAD_DEPARTMENT_NAME.to_owned(),
            company_id,
        }
    }
}
