//! Company creation and joining are all-or-nothing, even when a write fails
//! midway.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use support::{
    PASSWORD, add_company, add_to_company, init_app, json_body, session, sign_in, sign_up,
};
use thing_repository::domain::ports::{CredentialRepository, UserRepository};
use thing_repository::outbound::memory::{Fault, MemoryStore, MemoryStats};

#[rstest]
#[case(Fault::CompanyInsert)]
#[case(Fault::DepartmentInsert)]
#[case(Fault::CredentialCreate)]
#[case(Fault::UserPatch)]
#[case(Fault::Commit)]
#[actix_web::test]
async fn failed_creation_leaves_no_trace(#[case] fault: Fault) {
    let store = MemoryStore::new();
    let app = init_app!(store);
    let body = json_body(test::call_service(&app, sign_up("A", "a@x.com").to_request()).await).await;
    let (user_id, token) = session(&body);

    store.inject_fault(fault);
    let resp =
        test::call_service(&app, add_company(&token, "Acme", "1 Main St").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err = json_body(resp).await;
    assert_eq!(err["message"], "Internal server error");

    assert_eq!(
        store.stats().await,
        MemoryStats {
            users: 1,
            ..MemoryStats::default()
        }
    );
    let user = store
        .users()
        .find_by_id(user_id)
        .await
        .expect("lookup")
        .expect("user exists");
    assert!(!user.is_affiliated());
}

#[actix_web::test]
async fn retry_after_failure_creates_a_complete_company() {
    let store = MemoryStore::new();
    let app = init_app!(store);
    let body = json_body(test::call_service(&app, sign_up("A", "a@x.com").to_request()).await).await;
    let (user_id, token) = session(&body);

    store.inject_fault(Fault::CredentialCreate);
    let failed =
        test::call_service(&app, add_company(&token, "Acme", "1 Main St").to_request()).await;
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp =
        test::call_service(&app, add_company(&token, "Acme", "1 Main St").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        store.stats().await,
        MemoryStats {
            users: 1,
            companies: 1,
            departments: 1,
            credentials: 4,
        }
    );
    let grants = store
        .credentials()
        .list_by_user(user_id)
        .await
        .expect("credentials listed");
    assert!(grants.iter().all(|grant| grant.user_id == user_id));
}

#[rstest]
#[case(Fault::UserPatch)]
#[case(Fault::CredentialCreate)]
#[case(Fault::Commit)]
#[actix_web::test]
async fn failed_join_leaves_target_unaffiliated(#[case] fault: Fault) {
    let store = MemoryStore::new();
    let app = init_app!(store);
    let founder =
        json_body(test::call_service(&app, sign_up("Ada", "ada@x.com").to_request()).await).await;
    let (founder_id, token) = session(&founder);
    test::call_service(&app, add_company(&token, "Acme", "1 Main St").to_request()).await;
    let refreshed =
        json_body(test::call_service(&app, sign_in("ada@x.com", PASSWORD).to_request()).await)
            .await;
    let (_, admin_token) = session(&refreshed);
    let head = store
        .users()
        .find_by_id(founder_id)
        .await
        .expect("lookup")
        .and_then(|user| user.department_id)
        .expect("founder placed");
    let recruit =
        json_body(test::call_service(&app, sign_up("Grace", "grace@x.com").to_request()).await)
            .await;
    let (recruit_id, _) = session(&recruit);
    let before = store.stats().await;

    store.inject_fault(fault);
    let resp =
        test::call_service(&app, add_to_company(&admin_token, recruit_id, head).to_request())
            .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(store.stats().await, before);
    let recruit = store
        .users()
        .find_by_id(recruit_id)
        .await
        .expect("lookup")
        .expect("recruit exists");
    assert!(!recruit.is_affiliated());
    let grants = store
        .credentials()
        .list_by_user(recruit_id)
        .await
        .expect("credentials listed");
    assert!(grants.is_empty());

    let retried =
        test::call_service(&app, add_to_company(&admin_token, recruit_id, head).to_request())
            .await;
    assert_eq!(retried.status(), StatusCode::NO_CONTENT);
}
