//! Connection source shared by the Diesel repositories.
//!
//! A repository either borrows a fresh pooled connection per call or, when
//! handed out by a unit of work, shares the transaction's connection behind
//! an async mutex.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::bb8::PooledConnection;
use tokio::sync::{Mutex, MutexGuard};

use super::pool::{DbPool, OwnedConnection, PoolError};

/// Transaction connection shared between a unit of work and its repositories.
pub(crate) type SharedConnection = Arc<Mutex<OwnedConnection>>;

#[derive(Clone)]
pub(crate) enum Executor {
    Pool(DbPool),
    Transaction(SharedConnection),
}

pub(crate) enum ConnGuard<'a> {
    Pooled(PooledConnection<'a, AsyncPgConnection>),
    Shared(MutexGuard<'a, OwnedConnection>),
}

impl Executor {
    pub(crate) async fn connection(&self) -> Result<ConnGuard<'_>, PoolError> {
        match self {
            Self::Pool(pool) => pool.get().await.map(ConnGuard::Pooled),
            Self::Transaction(shared) => Ok(ConnGuard::Shared(shared.lock().await)),
        }
    }
}

impl Deref for ConnGuard<'_> {
    type Target = AsyncPgConnection;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Pooled(conn) => conn,
            Self::Shared(conn) => conn,
        }
    }
}

impl DerefMut for ConnGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Pooled(conn) => &mut *conn,
            Self::Shared(conn) => &mut **conn,
        }
    }
}
