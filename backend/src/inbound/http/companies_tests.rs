//! Tests for the company handlers.

use super::*;
use crate::domain::{Credential, CredentialType, ServiceError, UserId};
use crate::inbound::http::test_utils::{StatePorts, json_body};
use actix_web::{App, test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const CALLER: UserId = UserId::new(10);

#[fixture]
fn acme() -> Company {
    Company {
        id: CompanyId::new(1),
        company_name: "Acme".into(),
        address: "1 Main St".into(),
        image_url: None,
    }
}

fn admin_grants() -> Vec<Credential> {
    vec![Credential::on_company(
        CredentialType::CompanyAdmin,
        CALLER,
        CompanyId::new(1),
    )]
}

async fn send(ports: StatePorts, request: test::TestRequest) -> (u16, Value) {
    let app = test::init_service(
        App::new().app_data(ports.into_data()).service(
            web::scope("/api/v1")
                .service(add_company)
                .service(get_company)
                .service(update_company)
                .service(delete_company),
        ),
    )
    .await;
    let response = test::call_service(
        &app,
        request
            .insert_header(("Authorization", "Bearer token"))
            .to_request(),
    )
    .await;
    let status = response.status().as_u16();
    (status, json_body(response).await)
}

#[rstest]
#[actix_web::test]
async fn add_company_passes_caller_context(acme: Company) {
    let mut ports = StatePorts::default().authenticate_as(CALLER, Vec::new());
    ports
        .companies
        .expect_add_company()
        .withf(|ctx, draft| {
            ctx.user_id() == Ok(CALLER)
                && draft.company_name == "Acme"
                && draft.address == "1 Main St"
        })
        .times(1)
        .return_once(move |_, _| Ok(acme));

    let (status, body) = send(
        ports,
        test::TestRequest::post()
            .uri("/api/v1/company")
            .set_json(json!({ "company_name": " Acme ", "address": "1 Main St" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], 1);
    assert_eq!(body["company_name"], "Acme");
}

#[rstest]
#[actix_web::test]
async fn blank_company_name_is_rejected() {
    let mut ports = StatePorts::default().authenticate_as(CALLER, Vec::new());
    ports.companies.expect_add_company().never();

    let (status, body) = send(
        ports,
        test::TestRequest::post()
            .uri("/api/v1/company")
            .set_json(json!({ "company_name": "  ", "address": "1 Main St" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["details"]["field"], "company_name");
}

#[rstest]
#[actix_web::test]
async fn second_company_is_conflict() {
    let mut ports = StatePorts::default().authenticate_as(CALLER, admin_grants());
    ports
        .companies
        .expect_add_company()
        .return_once(|_, _| Err(ServiceError::UserAlreadyHasCompany));

    let (status, body) = send(
        ports,
        test::TestRequest::post()
            .uri("/api/v1/company")
            .set_json(json!({ "company_name": "Other", "address": "2 Oak St" })),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["message"], "user already has company");
}

#[rstest]
#[case(ServiceError::BadPermissions, 403)]
#[case(ServiceError::CompanyNotFound, 404)]
#[actix_web::test]
async fn get_company_maps_failures(#[case] failure: ServiceError, #[case] status: u16) {
    let mut ports = StatePorts::default().authenticate_as(CALLER, Vec::new());
    ports
        .companies_query
        .expect_get_company()
        .withf(|_, id| *id == CompanyId::new(1))
        .return_once(move |_, _| Err(failure));

    let (observed, _) = send(ports, test::TestRequest::get().uri("/api/v1/company/1")).await;
    assert_eq!(observed, status);
}

#[rstest]
#[actix_web::test]
async fn update_forwards_only_present_fields(acme: Company) {
    let mut ports = StatePorts::default().authenticate_as(CALLER, admin_grants());
    let updated = Company {
        address: "2 Oak St".into(),
        ..acme
    };
    ports
        .companies
        .expect_update_company()
        .withf(|_, patch, id| {
            *id == CompanyId::new(1)
                && patch.address.as_deref() == Some("2 Oak St")
                && patch.company_name.is_none()
                && patch.image_url.is_none()
        })
        .return_once(move |_, _, _| Ok(updated));

    let (status, body) = send(
        ports,
        test::TestRequest::patch()
            .uri("/api/v1/company/1")
            .set_json(json!({ "address": "2 Oak St" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["address"], "2 Oak St");
    assert_eq!(body["company_name"], "Acme");
}

#[rstest]
#[case(json!({ "company_name": "" }), "company_name")]
#[case(json!({ "address": "   " }), "address")]
#[case(json!({ "company_name": "Acme", "address": "\t" }), "address")]
#[actix_web::test]
async fn update_rejects_blank_present_fields(#[case] payload: Value, #[case] field: &str) {
    let mut ports = StatePorts::default().authenticate_as(CALLER, admin_grants());
    ports.companies.expect_update_company().never();

    let (status, body) = send(
        ports,
        test::TestRequest::patch()
            .uri("/api/v1/company/1")
            .set_json(payload),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn update_trims_present_fields(acme: Company) {
    let mut ports = StatePorts::default().authenticate_as(CALLER, admin_grants());
    ports
        .companies
        .expect_update_company()
        .withf(|_, patch, _| patch.company_name.as_deref() == Some("Acme Ltd"))
        .return_once(move |_, _, _| Ok(acme));

    let (status, _) = send(
        ports,
        test::TestRequest::patch()
            .uri("/api/v1/company/1")
            .set_json(json!({ "company_name": "  Acme Ltd " })),
    )
    .await;
    assert_eq!(status, 200);
}

#[rstest]
#[actix_web::test]
async fn delete_returns_no_content() {
    let mut ports = StatePorts::default().authenticate_as(CALLER, admin_grants());
    ports
        .companies
        .expect_delete_company()
        .times(1)
        .return_once(|_, _| Ok(()));

    let (status, body) = send(ports, test::TestRequest::delete().uri("/api/v1/company/1")).await;
    assert_eq!(status, 204);
    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn routes_require_a_token() {
    let mut ports = StatePorts::default();
    ports.companies_query.expect_get_company().never();
    let app = test::init_service(
        App::new()
            .app_data(ports.into_data())
            .service(web::scope("/api/v1").service(get_company)),
    )
    .await;
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/company/1").to_request(),
    )
    .await;
    assert_eq!(response.status().as_u16(), 401);
}
