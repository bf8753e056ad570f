//! Registration and login handlers.
//!
//! ```text
//! POST /api/v1/auth/sign-up {"first_name":"Ada","email":"ada@x.com","password":"Secret123"}
//! POST /api/v1/auth/sign-in {"user_mail":"ada@x.com","user_password":"Secret123"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, AuthSession, Error, ServiceError, SignInCredentials, SignUpData, User,
};

use super::state::HttpState;
use super::validation::map_credentials_error;

/// Message shared by every failed sign-in so callers cannot test for
/// registered addresses.
pub const SIGN_IN_FAILED: &str = "invalid username or password";

/// Body of `POST /api/v1/auth/sign-up`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignUpRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[serde(default)]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Secret123")]
    pub password: String,
}

/// Body of `POST /api/v1/auth/sign-in`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignInRequest {
    #[schema(example = "ada@example.com")]
    pub user_mail: String,
    #[schema(example = "Secret123")]
    pub user_password: String,
}

/// Authenticated user and their bearer token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user,
            token: session.token,
        }
    }
}

/// Register a user and return a token with no credentials.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "User created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let request = payload.into_inner();
    let data = SignUpData::try_from_parts(
        &request.first_name,
        &request.last_name,
        &request.email,
        &request.password,
    )
    .map_err(map_credentials_error)?;
    let session = state.auth.sign_up(data).await?;
    Ok(web::Json(session.into()))
}

/// Log in and return a token carrying the user's current credentials.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid username or password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let request = payload.into_inner();
    let credentials = SignInCredentials::try_from_parts(&request.user_mail, &request.user_password)
        .map_err(map_credentials_error)?;
    match state.auth.sign_in(credentials).await {
        Ok(session) => Ok(web::Json(session.into())),
        Err(err @ (ServiceError::UserNotFound | ServiceError::InvalidPassword)) => {
            debug!(reason = %err, "sign-in refused");
            Err(Error::unauthorized(SIGN_IN_FAILED))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
