//! Shared helpers for the integration suites.
//!
//! Integration tests compile as separate crates, so the request builders and
//! app wiring used by several suites live here. The Diesel suites use
//! [`embedded_postgres`] instead of the in-memory store.

#![allow(dead_code)]

pub mod embedded_postgres;
pub mod pg_embed;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use mockable::DefaultClock;
use serde_json::{Value, json};
use thing_repository::domain::ports::{TokenIssuer, VerifiedToken};
use thing_repository::domain::{CompanyId, DepartmentId, UserId};
use thing_repository::inbound::http::state::HttpState;
use thing_repository::outbound::memory::MemoryStore;
use thing_repository::outbound::security::JwtTokenIssuer;
use thing_repository::server::{ServerConfig, build_http_state};
use zeroize::Zeroizing;

pub const TOKEN_SECRET: &str = "integration-secret";
pub const HASH_SALT: &str = "integration-salt";
pub const PASSWORD: &str = "Secret123";

/// HTTP state wired to `store` with the test secrets.
pub fn memory_state(store: &MemoryStore) -> web::Data<HttpState> {
    let config = ServerConfig::new(
        ([127, 0, 0, 1], 0).into(),
        Zeroizing::new(TOKEN_SECRET.to_owned()),
        Zeroizing::new(HASH_SALT.to_owned()),
    )
    .with_memory_store(store.clone());
    web::Data::new(build_http_state(&config))
}

/// Initialise the full application over a [`MemoryStore`].
macro_rules! init_app {
    ($store:expr) => {
        actix_web::test::init_service(thing_repository::server::build_app(
            actix_web::web::Data::new(thing_repository::inbound::http::health::HealthState::new()),
            support::memory_state(&$store),
        ))
        .await
    };
}
pub(crate) use init_app;

pub fn sign_up(first_name: &str, email: &str) -> TestRequest {
    TestRequest::post().uri("/api/v1/auth/sign-up").set_json(json!({
        "first_name": first_name,
        "email": email,
        "password": PASSWORD,
    }))
}

pub fn sign_in(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/sign-in")
        .set_json(json!({ "user_mail": email, "user_password": password }))
}

pub fn add_company(token: &str, name: &str, address: &str) -> TestRequest {
    with_bearer(TestRequest::post().uri("/api/v1/company"), token)
        .set_json(json!({ "company_name": name, "address": address }))
}

/// `method` against `/company/{id}`.
pub fn company(method: TestRequest, token: &str, id: CompanyId) -> TestRequest {
    with_bearer(method.uri(&format!("/api/v1/company/{}", id.get())), token)
}

pub fn add_to_company(token: &str, user: UserId, department: DepartmentId) -> TestRequest {
    let uri = format!(
        "/api/v1/users/{}/add_to_company?department_id={}",
        user.get(),
        department.get()
    );
    with_bearer(TestRequest::post().uri(&uri), token)
}

pub fn find_users(token: &str, filter: &str) -> TestRequest {
    with_bearer(
        TestRequest::get().uri(&format!("/api/v1/users/find?filter={filter}")),
        token,
    )
}

pub fn with_bearer(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
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
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Pull `{user, token}` apart from an auth response.
pub fn session(body: &Value) -> (UserId, String) {
    let id = body["user"]["id"].as_i64().expect("user id");
    let token = body["token"].as_str().expect("token").to_owned();
    (UserId::new(id), token)
}

/// Verify a token the way the server does.
pub fn decode(token: &str) -> VerifiedToken {
    JwtTokenIssuer::new(TOKEN_SECRET.as_bytes(), Arc::new(DefaultClock))
        .validate(token)
        .expect("token validates")
}
