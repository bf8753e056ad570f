//! Transaction semantics of the in-memory store.

use super::*;
use crate::domain::ports::{CompanyRepositoryError, UserRepositoryError};
use crate::domain::{
    CompanyDraft, CompanyId, CredentialType, DepartmentId, EmailAddress, NewUser, UserId,
    UserPatch,
};

fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: EmailAddress::new(email).expect("valid email"),
        password_hash: "digest".into(),
    }
}

fn acme() -> CompanyDraft {
    CompanyDraft {
        company_name: "Acme".into(),
        address: "1 Main St".into(),
    }
}

#[tokio::test]
async fn committed_writes_become_visible() {
    let store = MemoryStore::new();
    let uow = store.transactions().begin().await.expect("begin");
    let company = uow.companies().insert(&acme()).await.expect("insert");
    uow.commit().await.expect("commit");

    let found = store
        .companies()
        .find_by_id(company.id)
        .await
        .expect("lookup");
    assert_eq!(found, Some(company));
}

#[tokio::test]
async fn dropped_unit_of_work_discards_writes() {
    let store = MemoryStore::new();
    {
        let uow = store.transactions().begin().await.expect("begin");
        uow.companies().insert(&acme()).await.expect("insert");
    }
    assert_eq!(store.stats().await, MemoryStats::default());
}

#[tokio::test]
async fn rollback_discards_writes() {
    let store = MemoryStore::new();
    let uow = store.transactions().begin().await.expect("begin");
    uow.users()
        .insert(&new_user("a@x.com"))
        .await
        .expect("insert");
    uow.rollback().await.expect("rollback");
    assert_eq!(store.stats().await.users, 0);
}

#[tokio::test]
async fn injected_fault_fires_once() {
    let store = MemoryStore::new();
    store.inject_fault(Fault::CompanyInsert);
    let companies = store.companies();

    let err = companies.insert(&acme()).await.expect_err("armed fault");
    assert!(matches!(err, CompanyRepositoryError::Query { .. }));
    companies.insert(&acme()).await.expect("fault consumed");
}

#[tokio::test]
async fn commit_fault_leaves_store_untouched() {
    let store = MemoryStore::new();
    store.inject_fault(Fault::Commit);
    let uow = store.transactions().begin().await.expect("begin");
    uow.companies().insert(&acme()).await.expect("insert");

    let err = uow.commit().await.expect_err("armed commit fault");
    assert!(matches!(err, UnitOfWorkError::Transaction { .. }));
    assert_eq!(store.stats().await.companies, 0);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = MemoryStore::new();
    let users = store.users();
    users.insert(&new_user("a@x.com")).await.expect("first");

    let err = users
        .insert(&new_user("a@x.com"))
        .await
        .expect_err("duplicate");
    assert_eq!(err, UserRepositoryError::duplicate_email("a@x.com"));
}

#[tokio::test]
async fn search_skips_placed_users_and_ignores_case() {
    let store = MemoryStore::new();
    let users = store.users();
    let free = users.insert(&new_user("ada@x.com")).await.expect("free");
    let placed = users
        .insert(&new_user("ada.placed@x.com"))
        .await
        .expect("placed");
    users
        .patch(
            placed.id,
            &UserPatch::placement(CompanyId::new(90), DepartmentId::new(91)),
        )
        .await
        .expect("place");

    let found = users
        .search_unaffiliated("ADA", 10, 0)
        .await
        .expect("search");
    assert_eq!(found, vec![free]);
    assert!(
        users
            .search_unaffiliated("ada", 10, 1)
            .await
            .expect("offset")
            .is_empty()
    );
}

#[tokio::test]
async fn credentials_list_company_grants_first() {
    let store = MemoryStore::new();
    let grants = store.credentials();
    let user = UserId::new(7);
    let department =
        Credential::on_department(CredentialType::DepartmentUser, user, DepartmentId::new(3));
    let company = Credential::on_company(CredentialType::CompanyUser, user, CompanyId::new(2));
    grants.create(&department).await.expect("department grant");
    grants.create(&company).await.expect("company grant");
    grants
        .create(&Credential::on_company(
            CredentialType::CompanyAdmin,
            UserId::new(8),
            CompanyId::new(2),
        ))
        .await
        .expect("other user");

    let listed = grants.list_by_user(user).await.expect("list");
    assert_eq!(listed, vec![company, department]);
}

#[tokio::test]
async fn transactions_are_serialised() {
    let store = MemoryStore::new();
    let first = store.transactions().begin().await.expect("begin");

    let manager = store.transactions();
    let second = tokio::spawn(async move {
        let uow = manager.begin().await.expect("second begin");
        uow.rollback().await.expect("rollback");
    });
    tokio::task::yield_now().await;
    assert!(!second.is_finished());

    first.rollback().await.expect("rollback");
    second.await.expect("second transaction ran");
}
