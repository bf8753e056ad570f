//! Bearer-token extractor producing the request's [`AuthContext`].
//!
//! Handlers that take an [`Identity`] argument reject the request with 401
//! before any service runs when the token is missing or unusable.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{AuthContext, Error, ServiceError};

use super::state::HttpState;

/// Authenticated caller.
#[derive(Debug, Clone)]
pub struct Identity(AuthContext);

impl Identity {
    /// Identity and credential snapshot for service calls.
    pub fn context(&self) -> &AuthContext {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::unauthorized("empty authorization header"))?;

    let parts: Vec<&str> = raw.split(' ').collect();
    match parts.as_slice() {
        [_, token] if !token.is_empty() => Ok(token),
        _ => Err(Error::unauthorized("invalid authorization header")),
    }
}

fn identify(req: &HttpRequest) -> Result<Identity, Error> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not registered"))?;
    let verified = state.tokens.validate(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::from(ServiceError::from(err))
    })?;
    Ok(Identity(AuthContext::authenticated(
        verified.user_id,
        verified.credentials,
    )))
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identify(req))
    }
}
