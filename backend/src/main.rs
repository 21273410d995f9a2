//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pantrie::config::PantrieSettings;
use pantrie::inbound::http::health::HealthState;
use pantrie::inbound::http::session_config::fingerprint::key_fingerprint;
use pantrie::inbound::http::session_config::{BuildMode, session_settings};
use pantrie::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PantrieSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let session = session_settings(&settings.session_inputs(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    )
    .with_lookup(settings.open_food_facts_url(), settings.lookup_timeout());

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(addr = %config.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
