//! PostgreSQL-backed company and department repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    CompanyRepository, CompanyRepositoryError, DepartmentRepository, DepartmentRepositoryError,
};
use crate::domain::{
    Company, CompanyDraft, CompanyId, CompanyPatch, Department, DepartmentDraft, DepartmentId,
};

use super::diesel_helpers::{map_basic_diesel_error, map_basic_pool_error};
use super::executor::{Executor, SharedConnection};
use super::models::{CompanyChangeset, CompanyRow, DepartmentRow, NewCompanyRow, NewDepartmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{companies, departments};

/// Diesel-backed implementation of the `CompanyRepository` port.
#[derive(Clone)]
pub struct DieselCompanyRepository {
    executor: Executor,
}

impl DieselCompanyRepository {
    /// Create a repository that checks out a connection per call.
    pub fn new(pool: DbPool) -> Self {
        Self {
            executor: Executor::Pool(pool),
        }
    }

    pub(crate) fn in_transaction(conn: SharedConnection) -> Self {
        Self {
            executor: Executor::Transaction(conn),
        }
    }
}

fn map_company_pool_error(error: PoolError) -> CompanyRepositoryError {
    map_basic_pool_error(error, CompanyRepositoryError::connection)
}

fn map_company_diesel_error(error: diesel::result::Error) -> CompanyRepositoryError {
    map_basic_diesel_error(
        error,
        CompanyRepositoryError::query,
        CompanyRepositoryError::connection,
    )
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn insert(&self, draft: &CompanyDraft) -> Result<Company, CompanyRepositoryError> {
        let mut conn = self
            .executor
            .connection()
            .await
            .map_err(map_company_pool_error)?;
        diesel::insert_into(companies::table)
            .values(NewCompanyRow {
                company_name: &draft.company_name,
                address: &draft.address,
            })
            .returning(CompanyRow::as_returning())
            .get_result(&mut *conn)
            .await
            .map(Company::from)
            .map_err(map_company_diesel_error)
    }

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        let mut conn = self
            .executor
            .connection()
            .await
            .map_err(map_company_pool_error)?;
        let row = companies::table
            .find(id.get())
            .select(CompanyRow::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(map_company_diesel_error)?;
        Ok(row.map(Company::from))
    }

    async fn update(
        &self,
        id: CompanyId,
        patch: &CompanyPatch,
    ) -> Result<(), CompanyRepositoryError> {
        if patch.is_empty() {
            return Err(CompanyRepositoryError::empty_patch());
        }
        let changeset = CompanyChangeset {
            company_name: patch.company_name.as_deref(),
            address: patch.address.as_deref(),
            image_url: patch.image_url.as_deref(),
        };
        let mut conn = self
            .executor
            .connection()
            .await
            .map_err(map_company_pool_error)?;
        diesel::update(companies::table.find(id.get()))
            .set(changeset)
            .execute(&mut *conn)
            .await
            .map(|_| ())
            .map_err(map_company_diesel_error)
    }

    async fn delete(&self, id: CompanyId) -> Result<(), CompanyRepositoryError> {
        let mut conn = self
            .executor
            .connection()
            .await
            .map_err(map_company_pool_error)?;
        diesel::delete(companies::table.find(id.get()))
            .execute(&mut *conn)
            .await
            .map(|_| ())
            .map_err(map_company_diesel_error)
    }
}

/// Diesel-backed implementation of the `DepartmentRepository` port.
#[derive(Clone)]
pub struct DieselDepartmentRepository {
    executor: Executor,
}

impl DieselDepartmentRepository {
    /// Create a repository that checks out a connection per call.
    pub fn new(pool: DbPool) -> Self {
        Self {
            executor: Executor::Pool(pool),
        }
    }

    pub(crate) fn in_transaction(conn: SharedConnection) -> Self {
        Self {
            executor: Executor::Transaction(conn),
        }
    }
}

fn map_department_pool_error(error: PoolError) -> DepartmentRepositoryError {
    map_basic_pool_error(error, DepartmentRepositoryError::connection)
}

fn map_department_diesel_error(error: diesel::result::Error) -> DepartmentRepositoryError {
    map_basic_diesel_error(
        error,
        DepartmentRepositoryError::query,
        DepartmentRepositoryError::connection,
    )
}

#[async_trait]
impl DepartmentRepository for DieselDepartmentRepository {
    async fn insert(
        &self,
        draft: &DepartmentDraft,
    ) -> Result<Department, DepartmentRepositoryError> {
        let mut conn = self
            .executor
            .connection()
            .await
            .map_err(map_department_pool_error)?;
        diesel::insert_into(departments::table)
            .values(NewDepartmentRow {
                department_name: &draft.department_name,
                company_id: draft.company_id.get(),
            })
            .returning(DepartmentRow::as_returning())
            .get_result(&mut *conn)
            .await
            .map(Department::from)
            .map_err(map_department_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>, DepartmentRepositoryError> {
        let mut conn = self
            .executor
            .connection()
            .await
            .map_err(map_department_pool_error)?;
        let row = departments::table
            .find(id.get())
            .select(DepartmentRow::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(map_department_diesel_error)?;
        Ok(row.map(Department::from))
    }
}
