//! Household allergen handlers.
//!
//! ```text
//! GET    /api/v1/households/{householdId}/allergens
//! POST   /api/v1/households/{householdId}/allergens {"name":"peanut"}
//! DELETE /api/v1/allergens/{allergenId}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Allergen, AllergenId, AllergenName, Error, FieldError, HouseholdId};
use crate::inbound::http::households::HOUSEHOLD_ID;
use crate::inbound::http::session::ActorSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_id, relabel, required, FieldName};
use crate::inbound::http::ApiResult;

const ALLERGEN_ID: FieldName = FieldName::new("allergenId");
const NAME: FieldName = FieldName::new("name");

/// Body for tracking a new allergen term. The name is stored lowercased.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllergenRequest {
    #[schema(example = "Peanut")]
    pub name: Option<String>,
}

/// Allergen terms tracked by a household, ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/households/{householdId}/allergens",
    params(("householdId" = String, Path, description = "Household identifier")),
    responses(
        (status = 200, description = "Allergens", body = [Allergen]),
        (status = 403, description = "Not a member", body = Error)
    ),
    tags = ["allergens"],
    operation_id = "listAllergens"
)]
#[get("/households/{household_id}/allergens")]
pub async fn list_allergens(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Allergen>>> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    Ok(web::Json(
        state.allergens_query.list(&actor, &household_id).await?,
    ))
}

/// Track a new allergen term. Admins only.
#[utoipa::path(
    post,
    path = "/api/v1/households/{householdId}/allergens",
    params(("householdId" = String, Path, description = "Household identifier")),
    request_body = CreateAllergenRequest,
    responses(
        (status = 201, description = "Allergen created", body = Allergen),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Already tracked", body = Error)
    ),
    tags = ["allergens"],
    operation_id = "createAllergen"
)]
#[post("/households/{household_id}/allergens")]
pub async fn create_allergen(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    payload: web::Json<CreateAllergenRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    let raw = required(payload.into_inner().name, NAME)?;
    let name = AllergenName::new(raw).map_err(|err| relabel(FieldError::from(err), NAME))?;
    let allergen = state
        .allergens
        .create(&actor, &household_id, name)
        .await?;
    Ok(HttpResponse::Created().json(allergen))
}

/// Stop tracking an allergen term. Admins only.
#[utoipa::path(
    delete,
    path = "/api/v1/allergens/{allergenId}",
    params(("allergenId" = String, Path, description = "Allergen identifier")),
    responses(
        (status = 204, description = "Allergen deleted"),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["allergens"],
    operation_id = "deleteAllergen"
)]
#[delete("/allergens/{allergen_id}")]
pub async fn delete_allergen(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let allergen_id: AllergenId = parse_id(&path, ALLERGEN_ID)?;
    state.allergens.delete(&actor, &allergen_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
