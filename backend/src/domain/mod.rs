//! Domain primitives, aggregates and services.
//!
//! Purpose: model households and everything they own, decide who may do what
//! inside a household, and flag allergens in item ingredients. Nothing here
//! knows about HTTP or SQL; adapters talk to the domain through [`ports`].
//!
//! Public surface:
//! - [`authorize`] and [`HouseholdRole`]: the explicit capability table.
//! - [`detect_allergens`]: word-boundary allergen matching.
//! - Entities: [`Household`], [`Membership`], [`Allergen`], [`Location`],
//!   [`Category`], [`InventoryItem`], [`ProductInfo`], [`User`].
//! - Services implementing the driving ports, generic over driven ports.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.

pub mod access;
pub mod access_guard;
pub mod allergens;
pub mod auth;
pub mod category;
pub mod error;
pub mod household;
pub mod inventory;
pub mod location;
pub mod membership;
pub mod ports;
pub mod product;
pub mod trace_id;
pub mod user;
pub mod values;

mod allergen_service;
mod category_service;
mod household_service;
mod inventory_service;
mod location_service;
mod member_service;
mod product_service;
mod profile_service;

pub use self::access::{
    authorize, authorize_stored_role, AccessDecision, HouseholdAction, HouseholdRole, StoredRole,
    UnknownRole,
};
pub use self::access_guard::AccessGuard;
pub use self::allergen_service::AllergenService;
pub use self::allergens::{
    detect_allergens, Allergen, AllergenId, AllergenName, AllergenValidationError,
    ALLERGEN_NAME_MAX,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::category::{default_categories, Category, CategoryId, DEFAULT_CATEGORIES};
pub use self::category_service::CategoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::household::{
    Household, HouseholdChanges, HouseholdDraft, HouseholdId, HouseholdName, HouseholdOverview,
    HOUSEHOLD_DESCRIPTION_MAX,
};
pub use self::household_service::HouseholdService;
pub use self::inventory::{
    InventoryItem, InventoryItemId, ItemChanges, ItemDraft, ItemName, ItemQuery, ItemSortField,
    ItemView, Quantity, QuantityError, SortOrder, ITEM_BARCODE_MAX, ITEM_BRAND_MAX, ITEM_UNIT_MAX,
};
pub use self::inventory_service::{InventoryRepositories, InventoryService};
pub use self::location::{
    Location, LocationChanges, LocationDraft, LocationId, LocationName,
    LOCATION_DESCRIPTION_MAX, LOCATION_ICON_MAX,
};
pub use self::location_service::LocationService;
pub use self::member_service::MemberService;
pub use self::membership::{Member, Membership, MembershipId};
pub use self::product::{
    format_allergen_tags, format_ingredients, Barcode, BarcodeError, ProductInfo,
};
pub use self::product_service::ProductService;
pub use self::profile_service::ProfileService;
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, Email, User, UserId, UserValidationError};
pub use self::values::{optional_text, required_text, FieldError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pantrie::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
