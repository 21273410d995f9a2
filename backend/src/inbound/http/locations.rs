//! Storage location handlers.
//!
//! ```text
//! GET    /api/v1/households/{householdId}/locations
//! POST   /api/v1/households/{householdId}/locations {"name":"Pantry","icon":"🥫"}
//! GET    /api/v1/locations/{locationId}
//! PUT    /api/v1/locations/{locationId}
//! DELETE /api/v1/locations/{locationId}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, HouseholdId, Location, LocationChanges, LocationDraft, LocationId,
};
use crate::inbound::http::households::HOUSEHOLD_ID;
use crate::inbound::http::session::ActorSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{nullable, parse_id, rejected, required, FieldName};
use crate::inbound::http::ApiResult;

const LOCATION_ID: FieldName = FieldName::new("locationId");
const NAME: FieldName = FieldName::new("name");

/// Body for creating a location.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[schema(example = "Pantry")]
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Body for updating a location; `null` clears an optional field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
}

/// Locations of a household, ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/households/{householdId}/locations",
    params(("householdId" = String, Path, description = "Household identifier")),
    responses(
        (status = 200, description = "Locations", body = [Location]),
        (status = 403, description = "Not a member", body = Error)
    ),
    tags = ["locations"],
    operation_id = "listLocations"
)]
#[get("/households/{household_id}/locations")]
pub async fn list_locations(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Location>>> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    Ok(web::Json(
        state.locations_query.list(&actor, &household_id).await?,
    ))
}

/// Add a location to a household.
#[utoipa::path(
    post,
    path = "/api/v1/households/{householdId}/locations",
    params(("householdId" = String, Path, description = "Household identifier")),
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Name already used", body = Error)
    ),
    tags = ["locations"],
    operation_id = "createLocation"
)]
#[post("/households/{household_id}/locations")]
pub async fn create_location(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    payload: web::Json<CreateLocationRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    let body = payload.into_inner();
    let name = required(body.name, NAME)?;
    let draft = LocationDraft::new(&name, body.description.as_deref(), body.icon.as_deref())
        .map_err(rejected)?;
    let location = state
        .locations
        .create(&actor, &household_id, draft)
        .await?;
    Ok(HttpResponse::Created().json(location))
}

/// One location.
#[utoipa::path(
    get,
    path = "/api/v1/locations/{locationId}",
    params(("locationId" = String, Path, description = "Location identifier")),
    responses(
        (status = 200, description = "Location", body = Location),
        (status = 403, description = "Not a member", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["locations"],
    operation_id = "getLocation"
)]
#[get("/locations/{location_id}")]
pub async fn get_location(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<Location>> {
    let actor = session.require_actor()?;
    let location_id: LocationId = parse_id(&path, LOCATION_ID)?;
    Ok(web::Json(
        state.locations_query.get(&actor, &location_id).await?,
    ))
}

/// Change a location.
#[utoipa::path(
    put,
    path = "/api/v1/locations/{locationId}",
    params(("locationId" = String, Path, description = "Location identifier")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Name already used", body = Error)
    ),
    tags = ["locations"],
    operation_id = "updateLocation"
)]
#[put("/locations/{location_id}")]
pub async fn update_location(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    payload: web::Json<UpdateLocationRequest>,
) -> ApiResult<web::Json<Location>> {
    let actor = session.require_actor()?;
    let location_id: LocationId = parse_id(&path, LOCATION_ID)?;
    let body = payload.into_inner();
    let changes = LocationChanges::new(
        body.name.as_deref(),
        body.description.as_ref().map(Option::as_deref),
        body.icon.as_ref().map(Option::as_deref),
    )
    .map_err(rejected)?;
    Ok(web::Json(
        state
            .locations
            .update(&actor, &location_id, changes)
            .await?,
    ))
}

/// Delete a location. Items stored there keep existing without a location.
#[utoipa::path(
    delete,
    path = "/api/v1/locations/{locationId}",
    params(("locationId" = String, Path, description = "Location identifier")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["locations"],
    operation_id = "deleteLocation"
)]
#[delete("/locations/{location_id}")]
pub async fn delete_location(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let location_id: LocationId = parse_id(&path, LOCATION_ID)?;
    state.locations.delete(&actor, &location_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockLocationCommand, MockLocationQuery};
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{session_cookie, test_app, TestPorts};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn pantry() -> Location {
        Location::create(
            HouseholdId::random(),
            LocationDraft::new("Pantry", None, Some("🥫")).expect("draft"),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_201() {
        let mut command = MockLocationCommand::new();
        command
            .expect_create()
            .withf(|_, _, draft| draft.name.as_ref() == "Pantry" && draft.icon.is_none())
            .return_once(|_, household, draft| Ok(Location::create(*household, draft)));
        let ports = TestPorts {
            locations: Some(Arc::new(command)),
            ..TestPorts::default()
        };
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&app, &UserId::random()).await;

        let req = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/households/{}/locations", HouseholdId::random()))
            .cookie(cookie)
            .set_json(json!({ "name": "Pantry", "icon": "  " }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[actix_web::test]
    async fn overlong_icons_name_the_field() {
        let app = actix_test::init_service(test_app(TestPorts::default())).await;
        let cookie = session_cookie(&app, &UserId::random()).await;

        let req = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/locations/{}", LocationId::random()))
            .cookie(cookie)
            .set_json(json!({ "icon": "x".repeat(51) }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["details"]["field"], "icon");
        assert_eq!(value["details"]["code"], "too_long");
    }

    #[rstest]
    #[actix_web::test]
    async fn get_returns_camel_case_json() {
        let location = pantry();
        let expected_household = location.household_id.to_string();
        let mut query = MockLocationQuery::new();
        query.expect_get().return_once(move |_, _| Ok(location));
        let ports = TestPorts {
            locations_query: Some(Arc::new(query)),
            ..TestPorts::default()
        };
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&app, &UserId::random()).await;

        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/locations/{}", LocationId::random()))
            .cookie(cookie)
            .to_request();
        let value: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(value["householdId"], expected_household);
        assert_eq!(value["icon"], "🥫");
    }

    #[rstest]
    #[actix_web::test]
    async fn viewers_cannot_delete() {
        let mut command = MockLocationCommand::new();
        command
            .expect_delete()
            .return_once(|_, _| Err(Error::forbidden("your role does not allow this action")));
        let ports = TestPorts {
            locations: Some(Arc::new(command)),
            ..TestPorts::default()
        };
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&app, &UserId::random()).await;

        let req = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/locations/{}", LocationId::random()))
            .cookie(cookie)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
