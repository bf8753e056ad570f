//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Email is already registered to another user.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Patch carried no fields to write.
        EmptyPatch => "user patch has no fields to change",
    }
}

/// Store of user records.
///
/// The same trait is implemented by pool-bound adapters for single reads and
/// by transaction-bound adapters handed out through a unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user and its secrets by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserRepositoryError>;

    /// Fetch a public profile by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a profile and lock its row until the surrounding transaction
    /// ends. Outside a transaction this behaves like [`Self::find_by_id`].
    async fn find_by_id_for_update(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new user with no company placement.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already taken.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Write the present fields of `patch`.
    ///
    /// Fails with [`UserRepositoryError::EmptyPatch`] when no field is set.
    async fn patch(&self, id: UserId, patch: &UserPatch) -> Result<(), UserRepositoryError>;

    /// Users with no company whose first name, last name or email contains
    /// `filter` case-insensitively, ordered by id.
    async fn search_unaffiliated(
        &self,
        filter: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, UserRepositoryError>;
}
