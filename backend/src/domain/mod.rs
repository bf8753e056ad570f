//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities of the credential model and
//! the services that enforce it. Adapters on either side talk to this layer
//! only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - ServiceError: failure taxonomy returned by services.
//! - User, Company, Department, Credential: stored aggregates.
//! - AuthContext: identity and credential snapshot of a request.
//! - AuthService, CompanyService, UserService: driving port implementations.

pub mod auth;
pub mod auth_service;
pub mod company;
pub mod company_service;
pub mod credential;
pub mod error;
pub mod ids;
pub mod ports;
pub mod service_error;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{
    AuthContext, AuthSession, CredentialsValidationError, MIN_PASSWORD_LENGTH, SignInCredentials,
    SignUpData,
};
pub use self::auth_service::AuthService;
pub use self::company::{
    Company, CompanyDraft, CompanyPatch, Department, DepartmentDraft, HEAD_DEPARTMENT_NAME,
};
pub use self::company_service::CompanyService;
pub use self::credential::{
    Credential, CredentialScope, CredentialType, UnknownCredentialType, founder_credentials,
    member_credentials,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CompanyId, DepartmentId, UserId};
pub use self::service_error::ServiceError;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, Placement, User, UserPatch, UserRecord, UserValidationError,
};
pub use self::user_service::{MAX_DIRECTORY_PAGE, UserService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use thing_repository::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
