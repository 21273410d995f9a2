//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{build_http_state, build_open_food_facts_lookup};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use std::sync::Arc;

use pantrie::Trace;
#[cfg(debug_assertions)]
use pantrie::doc::ApiDoc;
use pantrie::domain::ports::ProductLookup;
use pantrie::inbound::http::health::{HealthState, live, ready};
use pantrie::inbound::http::state::HttpState;
use pantrie::inbound::http::{api_services, extractor_configs};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub(crate) struct AppDependencies {
    pub(crate) health_state: web::Data<HealthState>,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
}

pub(crate) fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .configure(api_services);

    let (json_config, query_config, path_config) = extractor_configs();
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Barcode lookups go to Open Food Facts as configured on `config`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket, building the
/// lookup client or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let products = build_open_food_facts_lookup(&config.lookup)?;
    create_server_with_lookup(health_state, config, products)
}

/// Construct the server with an explicit barcode lookup use-case.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the
/// server fails.
pub fn create_server_with_lookup(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    products: Arc<dyn ProductLookup>,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config, products);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        listener,
        db_pool: _,
        memory_store: _,
        lookup: _,
    } = config;

    let builder = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    });
    let server = match listener {
        Some(listener) => builder.listen(listener)?,
        None => builder.bind(bind_addr)?,
    }
    .run();

    health_state.mark_ready();
    Ok(server)
}
