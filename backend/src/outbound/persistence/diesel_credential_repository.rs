//! PostgreSQL-backed `CredentialRepository`.
//!
//! Company-scoped grants live in `company_credentials`, department-scoped
//! grants in `department_credentials`. Both tables share one row shape.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{Credential, CredentialScope, CredentialType, UserId};

use super::diesel_helpers::{collect_rows, map_basic_diesel_error, map_basic_pool_error};
use super::executor::{Executor, SharedConnection};
use super::models::CredentialRow;
use super::pool::{DbPool, PoolError};
use super::schema::{company_credentials, department_credentials};

/// Diesel-backed implementation of the `CredentialRepository` port.
#[derive(Clone)]
pub struct DieselCredentialRepository {
    executor: Executor,
}

impl DieselCredentialRepository {
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

fn map_pool_error(error: PoolError) -> CredentialRepositoryError {
    map_basic_pool_error(error, CredentialRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CredentialRepositoryError {
    map_basic_diesel_error(
        error,
        CredentialRepositoryError::query,
        CredentialRepositoryError::connection,
    )
}

fn row_to_credential(row: CredentialRow) -> Result<Credential, String> {
    let credential_type = row
        .credential_type
        .parse::<CredentialType>()
        .map_err(|err| err.to_string())?;
    Ok(Credential {
        credential_type,
        user_id: UserId::new(row.user_id),
        object_id: row.object_id,
    })
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn create(&self, credential: &Credential) -> Result<i64, CredentialRepositoryError> {
        let kind = credential.credential_type.as_str();
        let user_id = credential.user_id.get();
        let object_id = credential.object_id;
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;

        let inserted = match credential.credential_type.scope() {
            CredentialScope::Company => {
                diesel::insert_into(company_credentials::table)
                    .values((
                        company_credentials::credential_type.eq(kind),
                        company_credentials::user_id.eq(user_id),
                        company_credentials::object_id.eq(object_id),
                    ))
                    .returning(company_credentials::id)
                    .get_result(&mut *conn)
                    .await
            }
            CredentialScope::Department => {
                diesel::insert_into(department_credentials::table)
                    .values((
                        department_credentials::credential_type.eq(kind),
                        department_credentials::user_id.eq(user_id),
                        department_credentials::object_id.eq(object_id),
                    ))
                    .returning(department_credentials::id)
                    .get_result(&mut *conn)
                    .await
            }
        };
        inserted.map_err(map_diesel_error)
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Credential>, CredentialRepositoryError> {
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;

        let mut rows: Vec<CredentialRow> = company_credentials::table
            .filter(company_credentials::user_id.eq(user_id.get()))
            .order_by(company_credentials::id)
            .select((
                company_credentials::credential_type,
                company_credentials::user_id,
                company_credentials::object_id,
            ))
            .load(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        let department_rows: Vec<CredentialRow> = department_credentials::table
            .filter(department_credentials::user_id.eq(user_id.get()))
            .order_by(department_credentials::id)
            .select((
                department_credentials::credential_type,
                department_credentials::user_id,
                department_credentials::object_id,
            ))
            .load(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        rows.extend(department_rows);

        collect_rows(
            rows.into_iter().map(row_to_credential),
            CredentialRepositoryError::query,
        )
    }
}
