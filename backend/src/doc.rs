//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every handler and wire type. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi_dump` prints it for tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Company, Credential, CredentialType, Error, ErrorCode, User};
use crate::inbound::http::auth::{AuthResponse, SignInRequest, SignUpRequest};
use crate::inbound::http::companies::{CreateCompanyRequest, UpdateCompanyRequest};

/// Adds the bearer token scheme issued by the auth endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by sign-up or sign-in; carries a credential snapshot.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Thing repository API",
        description = "Accounts, companies and the credentials that gate them."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::companies::add_company,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::update_company,
        crate::inbound::http::companies::delete_company,
        crate::inbound::http::users::find_users,
        crate::inbound::http::users::add_user_to_company,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Company,
        Credential,
        CredentialType,
        Error,
        ErrorCode,
        SignUpRequest,
        SignInRequest,
        AuthResponse,
        CreateCompanyRequest,
        UpdateCompanyRequest,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "companies", description = "Company lifecycle"),
        (name = "users", description = "Invite directory and membership"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;
