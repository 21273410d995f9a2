//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes and the
//! request/response schemas they reference. Domain entities derive
//! `ToSchema` directly; handler DTOs live next to their handlers.
//!
//! The generated document backs Swagger UI (debug builds) and is printed by
//! `cargo run --bin openapi-dump` for client generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Allergen, Category, Error, ErrorCode, Household, HouseholdOverview, HouseholdRole,
    InventoryItem, ItemSortField, ItemView, Location, Member, Membership, ProductInfo,
    SortOrder, User,
};
use crate::inbound::http::allergens::CreateAllergenRequest;
use crate::inbound::http::households::{CreateHouseholdRequest, UpdateHouseholdRequest};
use crate::inbound::http::items::{CreateItemRequest, ItemPage, UpdateItemRequest};
use crate::inbound::http::locations::{CreateLocationRequest, UpdateLocationRequest};
use crate::inbound::http::members::{AddMemberRequest, ChangeRoleRequest};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the Pantrie REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pantrie API",
        description = "Shared household inventory with allergen warnings and barcode lookup.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::households::list_households,
        crate::inbound::http::households::create_household,
        crate::inbound::http::households::get_household,
        crate::inbound::http::households::update_household,
        crate::inbound::http::households::delete_household,
        crate::inbound::http::members::list_members,
        crate::inbound::http::members::add_member,
        crate::inbound::http::members::change_member_role,
        crate::inbound::http::members::remove_member,
        crate::inbound::http::allergens::list_allergens,
        crate::inbound::http::allergens::create_allergen,
        crate::inbound::http::allergens::delete_allergen,
        crate::inbound::http::locations::list_locations,
        crate::inbound::http::locations::create_location,
        crate::inbound::http::locations::get_location,
        crate::inbound::http::locations::update_location,
        crate::inbound::http::locations::delete_location,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::reference::list_categories,
        crate::inbound::http::reference::lookup_barcode,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        LoginRequest,
        Household,
        HouseholdOverview,
        HouseholdRole,
        CreateHouseholdRequest,
        UpdateHouseholdRequest,
        Membership,
        Member,
        AddMemberRequest,
        ChangeRoleRequest,
        Allergen,
        CreateAllergenRequest,
        Location,
        CreateLocationRequest,
        UpdateLocationRequest,
        InventoryItem,
        ItemView,
        ItemPage,
        ItemSortField,
        SortOrder,
        CreateItemRequest,
        UpdateItemRequest,
        Category,
        ProductInfo,
    )),
    tags(
        (name = "users", description = "Sign-in and the current profile"),
        (name = "households", description = "Households the caller belongs to"),
        (name = "members", description = "Household membership and roles"),
        (name = "allergens", description = "Allergen terms tracked per household"),
        (name = "locations", description = "Storage locations inside a household"),
        (name = "items", description = "Inventory items with allergen warnings"),
        (name = "reference", description = "Categories and barcode lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
