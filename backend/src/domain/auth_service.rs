//! Registration and login.
//!
//! [`AuthService`] implements [`AuthCommand`]. Sign-up issues a token with an
//! empty credential set; sign-in loads the user's current grants and embeds
//! them, so tokens are capability snapshots that go stale when new grants
//! are made.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    AuthCommand, CredentialRepository, PasswordHasher, TokenIssuer, UserRepository,
};
use crate::domain::{AuthSession, NewUser, ServiceError, SignInCredentials, SignUpData};

/// Authentication service implementing the driving port.
#[derive(Clone)]
pub struct AuthService<U, C, H, T> {
    users: Arc<U>,
    credentials: Arc<C>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, C, H, T> AuthService<U, C, H, T> {
    /// Create a new service with the given ports.
    pub fn new(users: Arc<U>, credentials: Arc<C>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            credentials,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U, C, H, T> AuthCommand for AuthService<U, C, H, T>
where
    U: UserRepository,
    C: CredentialRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn sign_up(&self, data: SignUpData) -> Result<AuthSession, ServiceError> {
        let new_user = NewUser {
            first_name: data.first_name().to_owned(),
            last_name: data.last_name().to_owned(),
            email: data.email().clone(),
            password_hash: self.hasher.hash(data.password()),
        };
        let user = self.users.insert(&new_user).await?;
        let token = self.tokens.generate(user.id, &[])?;
        debug!(user_id = %user.id, "user signed up");
        Ok(AuthSession { user, token })
    }

    async fn sign_in(&self, credentials: SignInCredentials) -> Result<AuthSession, ServiceError> {
        let record = self
            .users
            .find_by_email(credentials.email())
            .await?
            .ok_or(ServiceError::UserNotFound)?;
        if !self
            .hasher
            .verify(&record.password_hash, credentials.password())
        {
            return Err(ServiceError::InvalidPassword);
        }

        let user = record.profile;
        let grants = self.credentials.list_by_user(user.id).await?;
        let token = self.tokens.generate(user.id, &grants)?;
        debug!(user_id = %user.id, grants = grants.len(), "user signed in");
        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
