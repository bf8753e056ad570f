//! Builders wiring repositories and security adapters into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    CompanyRepository, CredentialRepository, PasswordHasher, TokenIssuer, TransactionManager,
    UserRepository,
};
use crate::domain::{AuthService, CompanyService, UserService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselCompanyRepository, DieselCredentialRepository, DieselTransactionManager,
    DieselUserRepository,
};
use crate::outbound::security::{JwtTokenIssuer, SaltedPasswordHasher};

use super::config::{ServerConfig, StoreBackend};

struct Security {
    hasher: Arc<SaltedPasswordHasher>,
    tokens: Arc<JwtTokenIssuer>,
}

impl Security {
    fn from_config(config: &ServerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            hasher: Arc::new(SaltedPasswordHasher::new(config.hash_salt.as_str())),
            tokens: Arc::new(JwtTokenIssuer::new(config.token_secret.as_bytes(), clock)),
        }
    }
}

fn assemble<U, R, C, T, H, K>(
    users: Arc<U>,
    credentials: Arc<R>,
    companies: Arc<C>,
    transactions: Arc<T>,
    hasher: Arc<H>,
    tokens: Arc<K>,
) -> HttpState
where
    U: UserRepository + 'static,
    R: CredentialRepository + 'static,
    C: CompanyRepository + 'static,
    T: TransactionManager + 'static,
    H: PasswordHasher + 'static,
    K: TokenIssuer + 'static,
{
    let auth = Arc::new(AuthService::new(
        Arc::clone(&users),
        credentials,
        hasher,
        Arc::clone(&tokens),
    ));
    let company_service = Arc::new(CompanyService::new(Arc::clone(&transactions), companies));
    let user_service = Arc::new(UserService::new(transactions, users));

    HttpState {
        auth,
        companies: company_service.clone(),
        companies_query: company_service,
        directory: user_service.clone(),
        membership: user_service,
        tokens,
    }
}

fn diesel_state(pool: &DbPool, security: Security) -> HttpState {
    assemble(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselCredentialRepository::new(pool.clone())),
        Arc::new(DieselCompanyRepository::new(pool.clone())),
        Arc::new(DieselTransactionManager::new(pool.clone())),
        security.hasher,
        security.tokens,
    )
}

fn memory_state(store: &MemoryStore, security: Security) -> HttpState {
    assemble(
        Arc::new(store.users()),
        Arc::new(store.credentials()),
        Arc::new(store.companies()),
        Arc::new(store.transactions()),
        security.hasher,
        security.tokens,
    )
}

/// Build the HTTP state for the configured backend using the system clock.
#[must_use]
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    build_http_state_with_clock(config, Arc::new(DefaultClock))
}

/// Build the HTTP state with an explicit clock for token timestamps.
#[must_use]
pub fn build_http_state_with_clock(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    let security = Security::from_config(config, clock);
    match &config.store {
        StoreBackend::Postgres(pool) => diesel_state(pool, security),
        StoreBackend::Memory(store) => memory_state(store, security),
    }
}
