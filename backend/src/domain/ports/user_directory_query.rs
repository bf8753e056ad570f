//! Driving port for finding users to invite.

use async_trait::async_trait;

use crate::domain::{AuthContext, ServiceError, User};

/// Paging window for directory searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryPage {
    /// Maximum rows to return; clamped to `1..=100`.
    pub limit: i64,
    /// Rows to skip; must not be negative.
    pub offset: i64,
}

/// Domain use-case port for the invite directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryQuery: Send + Sync {
    /// Users without a company matching `filter`.
    async fn find_users_for_invite(
        &self,
        ctx: &AuthContext,
        filter: &str,
        page: DirectoryPage,
    ) -> Result<Vec<User>, ServiceError>;
}
