//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};

use crate::domain::UserId;
use crate::domain::ports::{
    AllergenCommand, AllergenQuery, CategoryQuery, HouseholdCommand, HouseholdQuery,
    InventoryCommand, InventoryQuery, LocationCommand, LocationQuery, LoginService,
    MemberCommand, MemberQuery, MockAllergenCommand, MockAllergenQuery, MockCategoryQuery,
    MockHouseholdCommand, MockHouseholdQuery, MockInventoryCommand, MockInventoryQuery,
    MockLocationCommand, MockLocationQuery, MockLoginService, MockMemberCommand,
    MockMemberQuery, MockProductLookup, MockUserProfileQuery, ProductLookup, UserProfileQuery,
};
use crate::inbound::http::error::extractor_configs;
use crate::inbound::http::session::ActorSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::api_services;

const SIGN_IN_PATH: &str = "/__test/sign-in";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports handed to [`test_app`]. Unset ports become mocks without
/// expectations, so any unexpected call fails the test.
#[derive(Default)]
pub struct TestPorts {
    pub login: Option<Arc<dyn LoginService>>,
    pub profile: Option<Arc<dyn UserProfileQuery>>,
    pub households: Option<Arc<dyn HouseholdCommand>>,
    pub households_query: Option<Arc<dyn HouseholdQuery>>,
    pub members: Option<Arc<dyn MemberCommand>>,
    pub members_query: Option<Arc<dyn MemberQuery>>,
    pub allergens: Option<Arc<dyn AllergenCommand>>,
    pub allergens_query: Option<Arc<dyn AllergenQuery>>,
    pub locations: Option<Arc<dyn LocationCommand>>,
    pub locations_query: Option<Arc<dyn LocationQuery>>,
    pub items: Option<Arc<dyn InventoryCommand>>,
    pub items_query: Option<Arc<dyn InventoryQuery>>,
    pub categories: Option<Arc<dyn CategoryQuery>>,
    pub products: Option<Arc<dyn ProductLookup>>,
}

impl TestPorts {
    /// Fill the gaps with strict mocks and wrap the result for Actix.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: self
                .login
                .unwrap_or_else(|| Arc::new(MockLoginService::new())),
            profile: self
                .profile
                .unwrap_or_else(|| Arc::new(MockUserProfileQuery::new())),
            households: self
                .households
                .unwrap_or_else(|| Arc::new(MockHouseholdCommand::new())),
            households_query: self
                .households_query
                .unwrap_or_else(|| Arc::new(MockHouseholdQuery::new())),
            members: self
                .members
                .unwrap_or_else(|| Arc::new(MockMemberCommand::new())),
            members_query: self
                .members_query
                .unwrap_or_else(|| Arc::new(MockMemberQuery::new())),
            allergens: self
                .allergens
                .unwrap_or_else(|| Arc::new(MockAllergenCommand::new())),
            allergens_query: self
                .allergens_query
                .unwrap_or_else(|| Arc::new(MockAllergenQuery::new())),
            locations: self
                .locations
                .unwrap_or_else(|| Arc::new(MockLocationCommand::new())),
            locations_query: self
                .locations_query
                .unwrap_or_else(|| Arc::new(MockLocationQuery::new())),
            items: self
                .items
                .unwrap_or_else(|| Arc::new(MockInventoryCommand::new())),
            items_query: self
                .items_query
                .unwrap_or_else(|| Arc::new(MockInventoryQuery::new())),
            categories: self
                .categories
                .unwrap_or_else(|| Arc::new(MockCategoryQuery::new())),
            products: self
                .products
                .unwrap_or_else(|| Arc::new(MockProductLookup::new())),
        })
    }
}

async fn sign_in(session: ActorSession, path: web::Path<String>) -> HttpResponse {
    match UserId::new(path.into_inner()) {
        Ok(user) if session.sign_in(&user).is_ok() => HttpResponse::Ok().finish(),
        _ => HttpResponse::BadRequest().finish(),
    }
}

/// Application exposing the `/api/v1` routes over `ports`, plus a test-only
/// sign-in route used by [`session_cookie`].
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let (json, query, path) = extractor_configs();
    App::new()
        .app_data(ports.into_state())
        .app_data(json)
        .app_data(query)
        .app_data(path)
        .wrap(test_session_middleware())
        .route(&format!("{SIGN_IN_PATH}/{{user_id}}"), web::post().to(sign_in))
        .service(web::scope("/api/v1").configure(api_services))
}

/// Sign `user` in through the test-only route and return the session cookie.
pub async fn session_cookie<S, B>(app: &S, user: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_test::TestRequest::post()
        .uri(&format!("{SIGN_IN_PATH}/{user}"))
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert!(res.status().is_success(), "test sign-in failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
