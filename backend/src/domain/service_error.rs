//! Failure taxonomy shared by the auth, company and user services.
//!
//! Services never return transport errors. Inbound adapters convert a
//! [`ServiceError`] into the API [`Error`] payload through the `From` impl
//! below, which fixes the status code each kind maps to.

use tracing::{error, warn};

use super::Error;
use crate::domain::auth::CredentialsValidationError;
use crate::domain::ports::{
    CompanyRepositoryError, CredentialRepositoryError, DepartmentRepositoryError,
    TokenIssuerError, UnitOfWorkError, UserRepositoryError,
};

/// Errors raised by domain services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// No user matched the lookup.
    #[error("user not found")]
    UserNotFound,
    /// No company matched the lookup.
    #[error("company not found")]
    CompanyNotFound,
    /// No department matched the lookup.
    #[error("department not found")]
    DepartmentNotFound,
    /// Sign-up email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,
    /// Password did not match the stored digest.
    #[error("invalid password")]
    InvalidPassword,
    /// Bearer token failed signature or claim checks.
    #[error("invalid token")]
    InvalidToken,
    /// Bearer token is past its expiry.
    #[error("token is expired")]
    ExpiredToken,
    /// Handler reached without an authenticated context.
    #[error("invalid context")]
    InvalidContext,
    /// Caller lacks the credential the operation needs.
    #[error("bad permissions")]
    BadPermissions,
    /// Update request carried no fields.
    #[error("no data to change")]
    NoDataToChange,
    /// Request parameters were rejected.
    #[error("{message}")]
    InvalidInput {
        /// Human-readable reason.
        message: String,
    },
    /// User is already placed in a company.
    #[error("user already has company")]
    UserAlreadyHasCompany,
    /// Acting user could not be loaded.
    #[error("failed to get user data")]
    GetUserDataFailed,
    /// A backing store could not be reached.
    #[error("service unavailable: {message}")]
    Unavailable {
        /// Adapter detail, logged but not shown to clients.
        message: String,
    },
    /// Any other adapter failure.
    #[error("internal error: {message}")]
    Internal {
        /// Adapter detail, redacted before leaving the process.
        message: String,
    },
}

impl ServiceError {
    /// Build an [`ServiceError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Build an [`ServiceError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build an [`ServiceError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<CredentialsValidationError> for ServiceError {
    fn from(value: CredentialsValidationError) -> Self {
        Self::invalid_input(value.to_string())
    }
}

impl From<UserRepositoryError> for ServiceError {
    fn from(value: UserRepositoryError) -> Self {
        match value {
            UserRepositoryError::Connection { message } => Self::unavailable(message),
            UserRepositoryError::Query { message } => Self::internal(message),
            UserRepositoryError::DuplicateEmail { .. } => Self::UserAlreadyExists,
            UserRepositoryError::EmptyPatch => Self::NoDataToChange,
        }
    }
}

impl From<CompanyRepositoryError> for ServiceError {
    fn from(value: CompanyRepositoryError) -> Self {
        match value {
            CompanyRepositoryError::Connection { message } => Self::unavailable(message),
            CompanyRepositoryError::Query { message } => Self::internal(message),
            CompanyRepositoryError::EmptyPatch => Self::NoDataToChange,
        }
    }
}

impl From<DepartmentRepositoryError> for ServiceError {
    fn from(value: DepartmentRepositoryError) -> Self {
        match value {
            DepartmentRepositoryError::Connection { message } => Self::unavailable(message),
            DepartmentRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

impl From<CredentialRepositoryError> for ServiceError {
    fn from(value: CredentialRepositoryError) -> Self {
        match value {
            CredentialRepositoryError::Connection { message } => Self::unavailable(message),
            CredentialRepositoryError::Query { message } => Self::internal(message),
        }
    }
}

impl From<UnitOfWorkError> for ServiceError {
    fn from(value: UnitOfWorkError) -> Self {
        match value {
            UnitOfWorkError::Connection { message } => Self::unavailable(message),
            UnitOfWorkError::Transaction { message } => Self::internal(message),
        }
    }
}

impl From<TokenIssuerError> for ServiceError {
    fn from(value: TokenIssuerError) -> Self {
        match value {
            TokenIssuerError::Invalid { .. } => Self::InvalidToken,
            TokenIssuerError::Expired => Self::ExpiredToken,
            TokenIssuerError::Signing { message } => Self::internal(message),
        }
    }
}

impl From<ServiceError> for Error {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::UserNotFound
            | ServiceError::CompanyNotFound
            | ServiceError::DepartmentNotFound => Error::not_found(value.to_string()),
            ServiceError::UserAlreadyExists | ServiceError::UserAlreadyHasCompany => {
                Error::conflict(value.to_string())
            }
            ServiceError::InvalidPassword
            | ServiceError::InvalidToken
            | ServiceError::ExpiredToken => Error::unauthorized(value.to_string()),
            ServiceError::BadPermissions => Error::forbidden(value.to_string()),
            ServiceError::NoDataToChange => Error::invalid_request(value.to_string()),
            ServiceError::InvalidInput { message } => Error::invalid_request(message),
            ServiceError::InvalidContext => {
                error!("request reached a service without an auth context");
                Error::internal(value.to_string())
            }
            ServiceError::GetUserDataFailed => Error::internal(value.to_string()),
            ServiceError::Unavailable { message } => {
                warn!(%message, "backing store unavailable");
                Error::service_unavailable("service unavailable")
            }
            ServiceError::Internal { message } => Error::internal(message),
        }
    }
}
