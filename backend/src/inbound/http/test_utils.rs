//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use serde_json::Value;

use crate::domain::ports::{
    MockAuthCommand, MockCompanyCommand, MockCompanyQuery, MockMembershipCommand,
    MockTokenIssuer, MockUserDirectoryQuery, VerifiedToken,
};
use crate::domain::{Credential, UserId};

use super::state::HttpState;

/// Mocked driving ports, configured per test and then frozen into state.
#[derive(Default)]
pub struct StatePorts {
    pub auth: MockAuthCommand,
    pub companies: MockCompanyCommand,
    pub companies_query: MockCompanyQuery,
    pub directory: MockUserDirectoryQuery,
    pub membership: MockMembershipCommand,
    pub tokens: MockTokenIssuer,
}

impl StatePorts {
    /// Accept any bearer token as `user_id` holding `credentials`.
    pub fn authenticate_as(mut self, user_id: UserId, credentials: Vec<Credential>) -> Self {
        self.tokens.expect_validate().returning(move |_| {
            Ok(VerifiedToken {
                user_id,
                credentials: credentials.clone(),
            })
        });
        self
    }

    pub fn into_data(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            auth: Arc::new(self.auth),
            companies: Arc::new(self.companies),
            companies_query: Arc::new(self.companies_query),
            directory: Arc::new(self.directory),
            membership: Arc::new(self.membership),
            tokens: Arc::new(self.tokens),
        })
    }
}

/// Read a response body as JSON, mapping an empty body to `Value::Null`.
pub async fn json_body<B>(response: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let bytes = test::read_body(response).await;
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("JSON response body")
}
