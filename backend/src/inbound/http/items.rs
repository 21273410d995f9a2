//! Inventory item handlers.
//!
//! ```text
//! GET    /api/v1/households/{householdId}/items?page=1&pageSize=20&search=jam&sortBy=name&sortOrder=asc
//! POST   /api/v1/households/{householdId}/items {"name":"Peanut butter","quantity":"2"}
//! GET    /api/v1/items/{itemId}
//! PUT    /api/v1/items/{itemId}
//! DELETE /api/v1/items/{itemId}
//! ```
//!
//! Every item in a response carries `allergenWarnings`.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use pagination::{Page, PageLimits, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CategoryId, Error, FieldError, HouseholdId, InventoryItemId, ItemChanges, ItemDraft, ItemName,
    ItemQuery, ItemSortField, ItemView, LocationId, Quantity, QuantityError, SortOrder,
    ITEM_BARCODE_MAX, ITEM_BRAND_MAX, ITEM_UNIT_MAX,
};
use crate::inbound::http::households::HOUSEHOLD_ID;
use crate::inbound::http::session::ActorSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    invalid_value_error, nullable, nullable_text, parse_id, rejected, relabel, required, text,
    FieldName,
};
use crate::inbound::http::ApiResult;

const ITEM_ID: FieldName = FieldName::new("itemId");
const LOCATION_ID: FieldName = FieldName::new("locationId");
const NAME: FieldName = FieldName::new("name");
const QUANTITY: FieldName = FieldName::new("quantity");
const DESCRIPTION: FieldName = FieldName::new("description");
const UNIT: FieldName = FieldName::new("unit");
const BARCODE: FieldName = FieldName::new("barcode");
const BRAND: FieldName = FieldName::new("brand");
const IMAGE_URL: FieldName = FieldName::new("imageUrl");
const NOTES: FieldName = FieldName::new("notes");
const INGREDIENTS: FieldName = FieldName::new("ingredients");
const NUTRITIONAL_INFO: FieldName = FieldName::new("nutritionalInfo");
const PAGE: FieldName = FieldName::new("page");
const PAGE_SIZE: FieldName = FieldName::new("pageSize");

/// Body for adding an item. `quantity` accepts a number or a decimal string.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[schema(example = "Peanut butter")]
    pub name: Option<String>,
    #[schema(value_type = String, example = "2")]
    pub quantity: Option<Value>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub category_id: Option<i32>,
    pub location_id: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub barcode: Option<String>,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub ingredients: Option<String>,
    pub nutritional_info: Option<String>,
}

/// Body for changing an item. Absent fields stay as they are and `null`
/// clears an optional field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub quantity: Option<Value>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub location_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub expiration_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub barcode: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub brand: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub ingredients: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub nutritional_info: Option<Option<String>>,
}

/// Query string for item listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListItemsParams {
    /// One-based page number (default 1).
    pub page: Option<u32>,
    /// Items per page (default 20, at most 100).
    pub page_size: Option<u32>,
    /// Case-insensitive match on name, description or brand.
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub location_id: Option<String>,
    pub sort_by: Option<ItemSortField>,
    pub sort_order: Option<SortOrder>,
}

/// OpenAPI shape of `Page<ItemView>`.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemPage {
    items: Vec<ItemView>,
    total: u64,
    page: u32,
    page_size: u32,
    total_pages: u64,
}

fn quantity(raw: Value) -> Result<Quantity, Error> {
    let text = match raw {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => return Err(invalid_value_error(QUANTITY, "quantity must be a decimal number")),
    };
    text.parse()
        .map_err(|err: QuantityError| relabel(FieldError::from(err), QUANTITY))
}

fn item_name(raw: &str) -> Result<ItemName, Error> {
    ItemName::new(raw).map_err(rejected)
}

fn location(raw: &str) -> Result<LocationId, Error> {
    parse_id(raw, LOCATION_ID)
}

impl TryFrom<CreateItemRequest> for ItemDraft {
    type Error = Error;

    fn try_from(body: CreateItemRequest) -> Result<Self, Self::Error> {
        let name = item_name(&required(body.name, NAME)?)?;
        let mut draft = Self::new(name, quantity(required(body.quantity, QUANTITY)?)?);
        draft.description = text(body.description.as_deref(), DESCRIPTION, None)?;
        draft.unit = text(body.unit.as_deref(), UNIT, Some(ITEM_UNIT_MAX))?;
        draft.category_id = body.category_id.map(CategoryId::new);
        draft.location_id = body.location_id.as_deref().map(location).transpose()?;
        draft.purchase_date = body.purchase_date;
        draft.expiration_date = body.expiration_date;
        draft.barcode = text(body.barcode.as_deref(), BARCODE, Some(ITEM_BARCODE_MAX))?;
        draft.brand = text(body.brand.as_deref(), BRAND, Some(ITEM_BRAND_MAX))?;
        draft.image_url = text(body.image_url.as_deref(), IMAGE_URL, None)?;
        draft.notes = text(body.notes.as_deref(), NOTES, None)?;
        draft.ingredients = text(body.ingredients.as_deref(), INGREDIENTS, None)?;
        draft.nutritional_info =
            text(body.nutritional_info.as_deref(), NUTRITIONAL_INFO, None)?;
        Ok(draft)
    }
}

fn nullable_str(value: &Option<Option<String>>) -> Option<Option<&str>> {
    value.as_ref().map(Option::as_deref)
}

impl TryFrom<UpdateItemRequest> for ItemChanges {
    type Error = Error;

    fn try_from(body: UpdateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body.name.as_deref().map(item_name).transpose()?,
            quantity: body.quantity.map(quantity).transpose()?,
            description: nullable_text(nullable_str(&body.description), DESCRIPTION, None)?,
            unit: nullable_text(nullable_str(&body.unit), UNIT, Some(ITEM_UNIT_MAX))?,
            category_id: body.category_id.map(|id| id.map(CategoryId::new)),
            location_id: body
                .location_id
                .map(|id| id.as_deref().map(location).transpose())
                .transpose()?,
            purchase_date: body.purchase_date,
            expiration_date: body.expiration_date,
            barcode: nullable_text(nullable_str(&body.barcode), BARCODE, Some(ITEM_BARCODE_MAX))?,
            brand: nullable_text(nullable_str(&body.brand), BRAND, Some(ITEM_BRAND_MAX))?,
            image_url: nullable_text(nullable_str(&body.image_url), IMAGE_URL, None)?,
            notes: nullable_text(nullable_str(&body.notes), NOTES, None)?,
            ingredients: nullable_text(nullable_str(&body.ingredients), INGREDIENTS, None)?,
            nutritional_info: nullable_text(
                nullable_str(&body.nutritional_info),
                NUTRITIONAL_INFO,
                None,
            )?,
        })
    }
}

impl TryFrom<ListItemsParams> for ItemQuery {
    type Error = Error;

    fn try_from(params: ListItemsParams) -> Result<Self, Self::Error> {
        let page = PageRequest::new(params.page, params.page_size, PageLimits::default())
            .map_err(|err| {
                let field = match err {
                    PageRequestError::PageOutOfRange => PAGE,
                    PageRequestError::PageSizeOutOfRange { .. } => PAGE_SIZE,
                };
                invalid_value_error(field, err.to_string())
            })?;
        Ok(Self {
            page,
            search: params
                .search
                .map(|term| term.trim().to_owned())
                .filter(|term| !term.is_empty()),
            category_id: params.category_id.map(CategoryId::new),
            location_id: params.location_id.as_deref().map(location).transpose()?,
            sort_by: params.sort_by.unwrap_or_default(),
            sort_order: params.sort_order.unwrap_or_default(),
        })
    }
}

/// One page of a household's items.
#[utoipa::path(
    get,
    path = "/api/v1/households/{householdId}/items",
    params(
        ("householdId" = String, Path, description = "Household identifier"),
        ListItemsParams
    ),
    responses(
        (status = 200, description = "Items", body = ItemPage),
        (status = 400, description = "Invalid query", body = Error),
        (status = 403, description = "Not a member", body = Error)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/households/{household_id}/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    params: web::Query<ListItemsParams>,
) -> ApiResult<web::Json<Page<ItemView>>> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    let query = ItemQuery::try_from(params.into_inner())?;
    Ok(web::Json(
        state.items_query.list(&actor, &household_id, query).await?,
    ))
}

/// Add an item to a household.
#[utoipa::path(
    post,
    path = "/api/v1/households/{householdId}/items",
    params(("householdId" = String, Path, description = "Household identifier")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/households/{household_id}/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    payload: web::Json<CreateItemRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let household_id: HouseholdId = parse_id(&path, HOUSEHOLD_ID)?;
    let draft = ItemDraft::try_from(payload.into_inner())?;
    let view = state.items.create(&actor, &household_id, draft).await?;
    Ok(HttpResponse::Created().json(view))
}

/// One item with its allergen warnings.
#[utoipa::path(
    get,
    path = "/api/v1/items/{itemId}",
    params(("itemId" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item", body = ItemView),
        (status = 403, description = "Not a member", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{item_id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<ItemView>> {
    let actor = session.require_actor()?;
    let item_id: InventoryItemId = parse_id(&path, ITEM_ID)?;
    Ok(web::Json(state.items_query.get(&actor, &item_id).await?))
}

/// Change an item.
#[utoipa::path(
    put,
    path = "/api/v1/items/{itemId}",
    params(("itemId" = String, Path, description = "Item identifier")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[put("/items/{item_id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
    payload: web::Json<UpdateItemRequest>,
) -> ApiResult<web::Json<ItemView>> {
    let actor = session.require_actor()?;
    let item_id: InventoryItemId = parse_id(&path, ITEM_ID)?;
    let changes = ItemChanges::try_from(payload.into_inner())?;
    Ok(web::Json(
        state.items.update(&actor, &item_id, changes).await?,
    ))
}

/// Delete an item.
#[utoipa::path(
    delete,
    path = "/api/v1/items/{itemId}",
    params(("itemId" = String, Path, description = "Item identifier")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/items/{item_id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_actor()?;
    let item_id: InventoryItemId = parse_id(&path, ITEM_ID)?;
    state.items.delete(&actor, &item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
