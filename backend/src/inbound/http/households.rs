//! Household HTTP handlers.
//!
//! ```text
//! GET    /api/v1/households
//! POST   /api/v1/households
//! GET    /api/v1/households/{householdId}
//! PUT    /api/v1/households/{householdId}
//! DELETE /api/v1/households/{householdId}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Household, HouseholdChanges, HouseholdDraft, HouseholdId, HouseholdOverview,
};
use crate::inbound::http::session::ActorSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{nullable, parse_id, rejected, required, FieldName};
use crate::inbound::http::ApiResult;

pub(crate) const HOUSEHOLD_ID: FieldName = FieldName::new("householdId");
const NAME: FieldName = FieldName::new("name");

/// Body for creating a household.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHouseholdRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body for updating a household. Absent fields are left unchanged and a
/// `null` description clears it.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHouseholdRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

/// Households the caller belongs to, each with the caller's role.
#[utoipa::path(
    get,
    path = "/api/v1/households",
    responses(
        (status = 200, description = "Households", body = [HouseholdOverview]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["households"],
    operation_id = "listHouseholds"
)]
#[get("/households")]
pub async fn list_households(
    state: web::Data<HttpState>,
    session: ActorSession,
) -> ApiResult<web::Json<Vec<HouseholdOverview>>> {
    let actor = session.require_actor()?;
    Ok(web::Json(state.households_query.list(&actor).await?))
}

/// Create a household; the caller becomes its admin.
#[utoipa::path(
    post,
    path = "/api/v1/households",
    request_body = CreateHouseholdRequest,
    responses(
        (status = 201, description = "Household created", body = HouseholdOverview),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["households"],
    operation_id = "createHousehold"
)]
#[post("/households")]
pub async fn create_household(
    state: web::Data<HttpState>,
    session: ActorSession,
    payload: web::Json<CreateHouseholdRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let body = payload.into_inner();
    let name = required(body.name, NAME)?;
    let draft =
        HouseholdDraft::new(&name, body.description.as_deref()).map_err(rejected)?;
    let overview = state.households.create(&actor, draft).await?;
    Ok(HttpResponse::Created().json(overview))
}

/// One household as seen by the caller.
#[utoipa::path(
    get,
    path = "/api/v1/households/{householdId}",
    params(("householdId" = String, Path, description = "Household identifier")),
    responses(
        (status = 200, description = "Household", body = HouseholdOverview),
        (status = 403, description = "Not a member", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["households"],
    operation_id = "getHousehold"
)]
#[get("/households/{household_id}")]
pub async fn get_household(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<HouseholdOverview>> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    Ok(web::Json(
        state.households_query.get(&actor, &household_id).await?,
    ))
}

/// Rename or re-describe a household. Admins only.
#[utoipa::path(
    put,
    path = "/api/v1/households/{householdId}",
    params(("householdId" = String, Path, description = "Household identifier")),
    request_body = UpdateHouseholdRequest,
    responses(
        (status = 200, description = "Household updated", body = Household),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["households"],
    operation_id = "updateHousehold"
)]
#[put("/households/{household_id}")]
pub async fn update_household(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    payload: web::Json<UpdateHouseholdRequest>,
) -> ApiResult<web::Json<Household>> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    let body = payload.into_inner();
    let changes = HouseholdChanges::new(
        body.name.as_deref(),
        body.description.as_ref().map(Option::as_deref),
    )
    .map_err(rejected)?;
    Ok(web::Json(
        state
            .households
            .update(&actor, &household_id, changes)
            .await?,
    ))
}

/// Delete a household and everything it owns. Admins only.
#[utoipa::path(
    delete,
    path = "/api/v1/households/{householdId}",
    params(("householdId" = String, Path, description = "Household identifier")),
    responses(
        (status = 204, description = "Household deleted"),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["households"],
    operation_id = "deleteHousehold"
)]
#[delete("/households/{household_id}")]
pub async fn delete_household(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    state.households.delete(&actor, &household_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
