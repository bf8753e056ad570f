//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{companies, departments, users};
use crate::domain::{
    Company, CompanyId, Department, DepartmentId, User, UserId, UserRecord,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub password_hash: String,
    pub company_id: Option<i64>,
    pub department_id: Option<i64>,
    pub email_is_validated: bool,
    pub email_validation_token: Option<String>,
    pub vacation_time_start: Option<i64>,
    pub vacation_time_end: Option<i64>,
}

impl UserRow {
    pub(crate) fn into_record(self) -> UserRecord {
        UserRecord {
            profile: User {
                id: UserId::new(self.id),
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                image_url: self.image_url,
                company_id: self.company_id.map(CompanyId::new),
                department_id: self.department_id.map(DepartmentId::new),
                email_is_validated: self.email_is_validated,
                vacation_time_start: self.vacation_time_start,
                vacation_time_end: self.vacation_time_end,
            },
            password_hash: self.password_hash,
            email_validation_token: self.email_validation_token,
        }
    }

    pub(crate) fn into_profile(self) -> User {
        self.into_record().profile
    }
}

/// Insertable struct for sign-up.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Changeset for partial user updates. `None` columns are skipped.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub company_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// Row struct for reading from the companies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: i64,
    pub company_name: String,
    pub address: String,
    pub image_url: Option<String>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: CompanyId::new(row.id),
            company_name: row.company_name,
            address: row.address,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub company_name: &'a str,
    pub address: &'a str,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = companies)]
pub(crate) struct CompanyChangeset<'a> {
    pub company_name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

/// Row struct for reading from the departments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartmentRow {
    pub id: i64,
    pub department_name: String,
    pub company_id: i64,
    pub image_url: Option<String>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: DepartmentId::new(row.id),
            department_name: row.department_name,
            company_id: CompanyId::new(row.company_id),
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = departments)]
pub(crate) struct NewDepartmentRow<'a> {
    pub department_name: &'a str,
    pub company_id: i64,
}

/// Row shape shared by both credential tables; load it with an explicit
/// `(credential_type, user_id, object_id)` select.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct CredentialRow {
    pub credential_type: String,
    pub user_id: i64,
    pub object_id: i64,
}
