//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use zeroize::Zeroizing;

use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::DbPool;

/// Where repositories keep their rows.
#[derive(Clone)]
pub enum StoreBackend {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// Process-local store; contents vanish on exit.
    Memory(MemoryStore),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreBackend,
    pub(crate) token_secret: Zeroizing<String>,
    pub(crate) hash_salt: Zeroizing<String>,
}

impl ServerConfig {
    /// Configuration backed by a fresh in-memory store.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        token_secret: Zeroizing<String>,
        hash_salt: Zeroizing<String>,
    ) -> Self {
        Self {
            bind_addr,
            store: StoreBackend::Memory(MemoryStore::new()),
            token_secret,
            hash_salt,
        }
    }

    /// Persist through PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.store = StoreBackend::Postgres(pool);
        self
    }

    /// Persist into a caller-owned in-memory store.
    #[must_use]
    pub fn with_memory_store(mut self, store: MemoryStore) -> Self {
        self.store = StoreBackend::Memory(store);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Selected storage backend.
    #[must_use]
    pub fn store(&self) -> &StoreBackend {
        &self.store
    }
}
