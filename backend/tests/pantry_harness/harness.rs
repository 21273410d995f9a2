//! Live server harness over the in-memory store.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Every domain service is real; only the
//! authenticator and the external product catalogue are doubles. The
//! `WorldFixture` stops the server even if a scenario panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use pantrie::Trace;
use pantrie::domain::ports::DEVELOPMENT_USERNAME;
use pantrie::domain::{
    AllergenService, CategoryService, HouseholdService, InventoryRepositories, InventoryService,
    LocationService, MemberService, ProductService, ProfileService, TRACE_ID_HEADER, User,
};
use pantrie::inbound::http::state::HttpState;
use pantrie::inbound::http::{api_services, extractor_configs};
use pantrie::outbound::memory::InMemoryStore;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use super::doubles::{
    CatalogueResponse, RecordingProductCatalogue, SEEDED_PASSWORD, SeededLoginService,
};

/// Second account seeded next to the development account.
pub(crate) const GUEST_EMAIL: &str = "ada@example.com";
const GUEST_ID: &str = "22222222-2222-2222-2222-222222222222";
const GUEST_NAME: &str = "Ada Lovelace";

pub(crate) struct PantryWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) catalogue: RecordingProductCatalogue,
    pub(crate) cookies: HashMap<String, String>,
    pub(crate) ids: HashMap<&'static str, String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<PantryWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(&self.world);
    }
}

fn shutdown(world: &SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it. The future must
    // not borrow the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

fn http_state(store: &Arc<InMemoryStore>, catalogue: &RecordingProductCatalogue) -> HttpState {
    let households = Arc::new(HouseholdService::new(store.clone(), store.clone()));
    let members = Arc::new(MemberService::new(store.clone(), store.clone()));
    let allergens = Arc::new(AllergenService::new(store.clone(), store.clone()));
    let locations = Arc::new(LocationService::new(store.clone(), store.clone()));
    let items = Arc::new(InventoryService::new(InventoryRepositories {
        items: store.clone(),
        allergens: store.clone(),
        locations: store.clone(),
        categories: store.clone(),
        memberships: store.clone(),
    }));

    HttpState {
        login: Arc::new(SeededLoginService::new(store.clone())),
        profile: Arc::new(ProfileService::new(store.clone())),
        households: households.clone(),
        households_query: households,
        members: members.clone(),
        members_query: members,
        allergens: allergens.clone(),
        allergens_query: allergens,
        locations: locations.clone(),
        locations_query: locations,
        items: items.clone(),
        items_query: items,
        categories: Arc::new(CategoryService::new(store.clone())),
        products: Arc::new(ProductService::new(Arc::new(catalogue.clone()))),
    }
}

fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let (json_config, query_config, path_config) = extractor_configs();
        let api = web::scope("/api/v1")
            .wrap(session_middleware(key.clone()))
            .configure(api_services);
        App::new()
            .app_data(http_data.clone())
            .app_data(json_config)
            .app_data(query_config)
            .app_data(path_config)
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

/// Start a server over a fresh store holding the development account and a
/// guest account.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let store = Arc::new(InMemoryStore::new());
    store.insert_user(
        User::try_from_strings(GUEST_ID, GUEST_EMAIL, GUEST_NAME).expect("guest account"),
    );
    let catalogue = RecordingProductCatalogue::new(CatalogueResponse::Ok(None));
    let state = http_state(&store, &catalogue);

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(state) })
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(PantryWorld {
            runtime,
            local,
            base_url,
            server,
            catalogue,
            cookies: HashMap::new(),
            ids: HashMap::new(),
            last_status: None,
            last_body: None,
            last_trace_id: None,
        })),
    }
}

/// Sign `username` in and remember their session cookie.
pub(crate) fn sign_in(world: &SharedWorld, username: &str) {
    let payload = serde_json::json!({ "username": username, "password": SEEDED_PASSWORD });
    let (status, cookie) = with_world_async(world, |base_url| async move {
        let response = Client::default()
            .post(format!("{base_url}/api/v1/login"))
            .send_json(&payload)
            .await
            .expect("login request");
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(ToOwned::to_owned);
        (response.status().as_u16(), cookie)
    });

    assert_eq!(status, 200, "login as {username} should succeed");
    let cookie = cookie.expect("session cookie");
    world.borrow_mut().cookies.insert(username.to_owned(), cookie);
}

/// Sign the development account in.
pub(crate) fn sign_in_admin(world: &SharedWorld) {
    sign_in(world, DEVELOPMENT_USERNAME);
}

/// Send a JSON request as `actor` (or anonymously) and record the response.
pub(crate) fn request(
    world: &SharedWorld,
    actor: Option<&str>,
    method: Method,
    path: &str,
    payload: Option<Value>,
) {
    let cookie = actor.map(|name| {
        world
            .borrow()
            .cookies
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("{name} has not signed in"))
    });
    let path = path.to_owned();
    let (status, trace_id, body) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let body = response.body().await.expect("response body");
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json body")
        };
        (status, trace_id, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

/// Remember an identifier from the last response body under `label`.
pub(crate) fn remember_id(world: &SharedWorld, label: &'static str, pointer: &str) {
    let id = world
        .borrow()
        .last_body
        .as_ref()
        .and_then(|body| body.pointer(pointer))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| panic!("response has no {pointer}"));
    world.borrow_mut().ids.insert(label, id);
}

/// Identifier remembered under `label`.
pub(crate) fn id(world: &SharedWorld, label: &str) -> String {
    world
        .borrow()
        .ids
        .get(label)
        .cloned()
        .unwrap_or_else(|| panic!("no {label} id remembered"))
}

pub(crate) fn last_status(world: &SharedWorld) -> u16 {
    world.borrow().last_status.expect("a request was sent")
}

pub(crate) fn last_body(world: &SharedWorld) -> Value {
    world.borrow().last_body.clone().expect("a response was recorded")
}
