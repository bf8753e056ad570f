//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserPatch, UserRecord};

use super::diesel_helpers::{
    contains_pattern, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::executor::{Executor, SharedConnection};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    executor: Executor,
}

impl DieselUserRepository {
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

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

impl<'a> From<&'a UserPatch> for UserChangeset<'a> {
    fn from(patch: &'a UserPatch) -> Self {
        Self {
            first_name: patch.first_name.as_deref(),
            last_name: patch.last_name.as_deref(),
            image_url: patch.image_url.as_deref(),
            company_id: patch.placement.map(|p| p.company_id.get()),
            department_id: patch.placement.map(|p| p.department_id.get()),
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserRepositoryError> {
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_record))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_profile))
    }

    async fn find_by_id_for_update(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .for_update()
            .first(&mut *conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRow::into_profile))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: user.email.as_ref(),
            password_hash: &user.password_hash,
        };
        diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut *conn)
            .await
            .map(UserRow::into_profile)
            .map_err(|error| {
                if is_unique_violation(&error) {
                    UserRepositoryError::duplicate_email(user.email.as_ref())
                } else {
                    map_diesel_error(error)
                }
            })
    }

    async fn patch(&self, id: UserId, patch: &UserPatch) -> Result<(), UserRepositoryError> {
        if patch.is_empty() {
            return Err(UserRepositoryError::empty_patch());
        }
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;
        diesel::update(users::table.find(id.get()))
            .set(UserChangeset::from(patch))
            .execute(&mut *conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn search_unaffiliated(
        &self,
        filter: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let pattern = contains_pattern(filter);
        let mut conn = self.executor.connection().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::company_id.is_null())
            .filter(
                users::first_name
                    .ilike(&pattern)
                    .or(users::last_name.ilike(&pattern))
                    .or(users::email.ilike(&pattern)),
            )
            .select(UserRow::as_select())
            .order_by(users::id)
            .limit(limit)
            .offset(offset)
            .load(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(UserRow::into_profile).collect())
    }
}
