//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PANTRIE_*` environment variables and an
//! optional configuration file, in that order of precedence. Unset optional
//! values fall back to the defaults exposed by the accessor methods.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::session_config::SessionInputs;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
/// Public Open Food Facts API root.
pub const DEFAULT_OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org/api/v2";
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Configuration values for the Pantrie server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANTRIE")]
pub struct PantrieSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for session cookies (`Strict`, `Lax` or `None`).
    pub session_same_site: Option<String>,
    /// Root of the Open Food Facts v2 API.
    pub open_food_facts_url: Option<String>,
    /// Upper bound on a single barcode lookup, in seconds.
    pub lookup_timeout_secs: Option<u64>,
    /// Maximum size of the database connection pool.
    pub db_max_connections: Option<u32>,
}

impl PantrieSettings {
    /// Listener address, `0.0.0.0:8080` by default.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_PORT,
        )))
    }

    /// Database URL with blank values treated as unset.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Session key location.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Open Food Facts API root without a trailing slash.
    #[must_use]
    pub fn open_food_facts_url(&self) -> &str {
        self.open_food_facts_url
            .as_deref()
            .unwrap_or(DEFAULT_OPEN_FOOD_FACTS_URL)
            .trim_end_matches('/')
    }

    /// Barcode lookup timeout.
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(
            self.lookup_timeout_secs
                .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS),
        )
    }

    /// Connection pool ceiling.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether session cookies carry `Secure`, on unless set otherwise.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Session options in the shape the session validator expects.
    #[must_use]
    pub fn session_inputs(&self) -> SessionInputs {
        SessionInputs {
            key_file: self.session_key_file(),
            cookie_secure: self.cookie_secure(),
            same_site: self.session_same_site.clone(),
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}
