//! Household membership handlers.
//!
//! ```text
//! GET    /api/v1/households/{householdId}/members
//! POST   /api/v1/households/{householdId}/members {"email":"ada@example.com","role":"editor"}
//! PATCH  /api/v1/households/{householdId}/members/{membershipId} {"role":"viewer"}
//! DELETE /api/v1/households/{householdId}/members/{membershipId}
//! ```

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Email, Error, HouseholdId, HouseholdRole, Member, MembershipId};
use crate::inbound::http::households::HOUSEHOLD_ID;
use crate::inbound::http::session::ActorSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, parse_id, required, FieldName};
use crate::inbound::http::ApiResult;

const MEMBERSHIP_ID: FieldName = FieldName::new("membershipId");
const EMAIL: FieldName = FieldName::new("email");
const ROLE: FieldName = FieldName::new("role");

/// Body for adding a member. `role` defaults to `viewer`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub role: Option<HouseholdRole>,
}

/// Body for changing a member's role.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    pub role: Option<HouseholdRole>,
}

fn ids(path: &(String, String)) -> Result<(HouseholdId, MembershipId), Error> {
    Ok((
        parse_id(&path.0, HOUSEHOLD_ID)?,
        parse_id(&path.1, MEMBERSHIP_ID)?,
    ))
}

/// Members of a household with their profiles.
#[utoipa::path(
    get,
    path = "/api/v1/households/{householdId}/members",
    params(("householdId" = String, Path, description = "Household identifier")),
    responses(
        (status = 200, description = "Members", body = [Member]),
        (status = 403, description = "Not a member", body = Error),
        (status = 404, description = "Household not found", body = Error)
    ),
    tags = ["members"],
    operation_id = "listMembers"
)]
#[get("/households/{household_id}/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Member>>> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    Ok(web::Json(
        state.members_query.list(&actor, &household_id).await?,
    ))
}

/// Add a registered user to the household by e-mail.
#[utoipa::path(
    post,
    path = "/api/v1/households/{householdId}/members",
    params(("householdId" = String, Path, description = "Household identifier")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = Member),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No user with that e-mail", body = Error),
        (status = 409, description = "Already a member", body = Error)
    ),
    tags = ["members"],
    operation_id = "addMember"
)]
#[post("/households/{household_id}/members")]
pub async fn add_member(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    payload: web::Json<AddMemberRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    let body = payload.into_inner();
    let raw_email = required(body.email, EMAIL)?;
    let email = Email::new(&raw_email).map_err(|err| invalid_value_error(EMAIL, err.to_string()))?;
    let role = body.role.unwrap_or(HouseholdRole::Viewer);
    let member = state
        .members
        .add(&actor, &household_id, email, role)
        .await?;
    Ok(HttpResponse::Created().json(member))
}

/// Change a member's role.
#[utoipa::path(
    patch,
    path = "/api/v1/households/{householdId}/members/{membershipId}",
    params(
        ("householdId" = String, Path, description = "Household identifier"),
        ("membershipId" = String, Path, description = "Membership identifier")
    ),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = Member),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Membership not found", body = Error)
    ),
    tags = ["members"],
    operation_id = "changeMemberRole"
)]
#[patch("/households/{household_id}/members/{membership_id}")]
pub async fn change_member_role(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<(String, String)>,
    payload: web::Json<ChangeRoleRequest>,
) -> ApiResult<web::Json<Member>> {
    let actor = session.require_actor()?;
    let (household_id, membership_id) = ids(&path)?;
    let role = required(payload.into_inner().role, ROLE)?;
    Ok(web::Json(
        state
            .members
            .change_role(&actor, &household_id, &membership_id, role)
            .await?,
    ))
}

/// Remove a member from the household.
#[utoipa::path(
    delete,
    path = "/api/v1/households/{householdId}/members/{membershipId}",
    params(
        ("householdId" = String, Path, description = "Household identifier"),
        ("membershipId" = String, Path, description = "Membership identifier")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Membership not found", body = Error)
    ),
    tags = ["members"],
    operation_id = "removeMember"
)]
#[delete("/households/{household_id}/members/{membership_id}")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let (household_id, membership_id) = ids(&path)?;
    state
        .members
        .remove(&actor, &household_id, &membership_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
