//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{
    AuthCommand, CompanyCommand, CompanyQuery, MembershipCommand, TokenIssuer, UserDirectoryQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub companies: Arc<dyn CompanyCommand>,
    pub companies_query: Arc<dyn CompanyQuery>,
    pub directory: Arc<dyn UserDirectoryQuery>,
    pub membership: Arc<dyn MembershipCommand>,
    /// Verifies bearer tokens for the [`super::identity::Identity`] extractor.
    pub tokens: Arc<dyn TokenIssuer>,
}
