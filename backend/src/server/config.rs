//! HTTP server configuration object and helpers.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use pantrie::config::DEFAULT_OPEN_FOOD_FACTS_URL;
use pantrie::outbound::memory::InMemoryStore;
use pantrie::outbound::persistence::DbPool;

const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Where barcode lookups are sent and how long they may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPEN_FOOD_FACTS_URL.to_owned(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) listener: Option<TcpListener>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) memory_store: Option<Arc<InMemoryStore>>,
    pub(crate) lookup: LookupConfig,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            listener: None,
            db_pool: None,
            memory_store: None,
            lookup: LookupConfig::default(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, every repository port is served from PostgreSQL;
    /// otherwise an in-memory store is used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Serve from `store` when no database pool is configured.
    ///
    /// Without this a fresh seeded store is created at startup.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by integration tests")
    )]
    #[must_use]
    pub fn with_memory_store(mut self, store: Arc<InMemoryStore>) -> Self {
        self.memory_store = Some(store);
        self
    }

    /// Accept connections on an already-bound listener instead of
    /// binding `bind_addr`.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by integration tests")
    )]
    #[must_use]
    pub fn with_listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Send barcode lookups to `base_url`, giving up after `timeout`.
    #[must_use]
    pub fn with_lookup(mut self, base_url: impl Into<String>, timeout: Duration) -> Self {
        self.lookup = LookupConfig {
            base_url: base_url.into(),
            timeout,
        };
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.listener
            .as_ref()
            .and_then(|listener| listener.local_addr().ok())
            .unwrap_or(self.bind_addr)
    }
}
