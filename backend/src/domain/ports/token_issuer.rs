//! Port for signing and verifying bearer tokens.

use crate::domain::{Credential, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenIssuerError {
        /// Signature, algorithm or claims were rejected.
        Invalid { message: String } => "invalid token: {message}",
        /// The token's expiry has passed.
        Expired => "token is expired",
        /// The token could not be signed.
        Signing { message: String } => "failed to sign token: {message}",
    }
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    /// Subject of the token.
    pub user_id: UserId,
    /// Credential snapshot taken at issuance.
    pub credentials: Vec<Credential>,
}

/// Signs and verifies self-contained bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `user_id` carrying `credentials`.
    fn generate(
        &self,
        user_id: UserId,
        credentials: &[Credential],
    ) -> Result<String, TokenIssuerError>;

    /// Verify `token` and return its claims.
    fn validate(&self, token: &str) -> Result<VerifiedToken, TokenIssuerError>;
}
