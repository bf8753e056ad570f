//! Driving port for registration and login.
//!
//! Inbound adapters call it to obtain a bearer token without knowing how
//! users, hashes or tokens are stored.

use async_trait::async_trait;

use crate::domain::{AuthSession, ServiceError, SignInCredentials, SignUpData};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Register a user and return a token with no credentials.
    async fn sign_up(&self, data: SignUpData) -> Result<AuthSession, ServiceError>;

    /// Check a password and return a token with the user's credentials.
    async fn sign_in(&self, credentials: SignInCredentials) -> Result<AuthSession, ServiceError>;
}
