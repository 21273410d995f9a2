//! Inventory items and the query model used to list them.
//!
//! Every item belongs to exactly one household. Item reads are wrapped in
//! [`ItemView`], which carries the allergen warnings computed from the
//! item's ingredient text and the household's allergen list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::values::{bounded_text, uuid_identifier};
use crate::domain::{
    detect_allergens, Allergen, CategoryId, FieldError, HouseholdId, LocationId, UserId,
};

/// Maximum length of the free-text unit, e.g. "jars".
pub const ITEM_UNIT_MAX: usize = 50;
/// Maximum length of a stored barcode.
pub const ITEM_BARCODE_MAX: usize = 100;
/// Maximum length of a brand name.
pub const ITEM_BRAND_MAX: usize = 200;

/// Largest quantity storage accepts, in hundredths (`99_999_999.99`).
const QUANTITY_MAX_HUNDREDTHS: i64 = 9_999_999_999;

uuid_identifier!(
    /// Stable inventory item identifier.
    InventoryItemId
);

bounded_text!(
    /// Item name, 1 to 255 characters after trimming.
    ItemName,
    field = "name",
    max = 255
);

/// Reasons a quantity is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("quantity must be a decimal number")]
    Malformed,
    #[error("quantity must be greater than zero")]
    NotPositive,
    #[error("quantity can have at most 2 decimal places")]
    TooPrecise,
    #[error("quantity is too large")]
    TooLarge,
}

impl From<QuantityError> for FieldError {
    fn from(err: QuantityError) -> Self {
        Self::invalid("quantity", err.to_string())
    }
}

/// Strictly positive amount with at most two decimal places.
///
/// Held as a whole number of hundredths so arithmetic and ordering are exact.
/// Serialises as a decimal string with two fractional digits.
///
/// # Examples
/// ```
/// use pantrie::domain::Quantity;
///
/// let quantity: Quantity = "1.5".parse().unwrap();
/// assert_eq!(quantity.hundredths(), 150);
/// assert_eq!(quantity.to_string(), "1.50");
/// assert!("0".parse::<Quantity>().is_err());
/// assert!("1.005".parse::<Quantity>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quantity(i64);

impl Quantity {
    /// Build from a count of hundredths.
    pub const fn from_hundredths(hundredths: i64) -> Result<Self, QuantityError> {
        if hundredths <= 0 {
            return Err(QuantityError::NotPositive);
        }
        if hundredths > QUANTITY_MAX_HUNDREDTHS {
            return Err(QuantityError::TooLarge);
        }
        Ok(Self(hundredths))
    }

    /// Amount in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        if text.starts_with('-') {
            return Err(QuantityError::NotPositive);
        }
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !digits_only(whole) || !digits_only(fraction)
        {
            return Err(QuantityError::Malformed);
        }
        if fraction.len() > 2 {
            return Err(QuantityError::TooPrecise);
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| QuantityError::TooLarge)?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| QuantityError::Malformed)? * 10,
            _ => fraction.parse().map_err(|_| QuantityError::Malformed)?,
        };
        let hundredths = whole_value
            .checked_mul(100)
            .and_then(|value| value.checked_add(fraction_value))
            .ok_or(QuantityError::TooLarge)?;
        Self::from_hundredths(hundredths)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0.div_euclid(100), self.0.rem_euclid(100))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        let text = match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text,
            Repr::Integer(value) => value.to_string(),
            Repr::Float(value) => value.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// An item stored in a household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Item identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: InventoryItemId,
    /// Owning household.
    #[schema(value_type = String, format = Uuid)]
    pub household_id: HouseholdId,
    /// Optional category.
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<CategoryId>,
    /// Optional storage location in the same household.
    #[schema(value_type = Option<String>, format = Uuid)]
    pub location_id: Option<LocationId>,
    /// User who created the item.
    #[schema(value_type = String, format = Uuid)]
    pub added_by: UserId,
    /// Item name.
    #[schema(value_type = String, example = "Peanut butter")]
    pub name: ItemName,
    /// Free-form description.
    pub description: Option<String>,
    /// Amount held, with two decimal places.
    #[schema(value_type = String, example = "2.00")]
    pub quantity: Quantity,
    /// Unit for `quantity`, such as `g` or `jar`.
    pub unit: Option<String>,
    /// Date of purchase.
    pub purchase_date: Option<NaiveDate>,
    /// Best-before or use-by date.
    pub expiration_date: Option<NaiveDate>,
    /// Product barcode, if scanned.
    pub barcode: Option<String>,
    /// Brand name.
    pub brand: Option<String>,
    /// Product image.
    pub image_url: Option<String>,
    /// Household notes.
    pub notes: Option<String>,
    /// Ingredient text checked for allergens.
    pub ingredients: Option<String>,
    /// Free-form nutrition text.
    pub nutritional_info: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Materialise a new item added by `added_by`.
    #[must_use]
    pub fn create(household_id: HouseholdId, added_by: UserId, draft: ItemDraft) -> Self {
        let now = Utc::now();
        Self {
            id: InventoryItemId::random(),
            household_id,
            category_id: draft.category_id,
            location_id: draft.location_id,
            added_by,
            name: draft.name,
            description: draft.description,
            quantity: draft.quantity,
            unit: draft.unit,
            purchase_date: draft.purchase_date,
            expiration_date: draft.expiration_date,
            barcode: draft.barcode,
            brand: draft.brand,
            image_url: draft.image_url,
            notes: draft.notes,
            ingredients: draft.ingredients,
            nutritional_info: draft.nutritional_info,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, changes: ItemChanges) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(new_value) = value {
                *slot = new_value;
            }
        }

        set(&mut self.name, changes.name);
        set(&mut self.quantity, changes.quantity);
        set(&mut self.description, changes.description);
        set(&mut self.unit, changes.unit);
        set(&mut self.category_id, changes.category_id);
        set(&mut self.location_id, changes.location_id);
        set(&mut self.purchase_date, changes.purchase_date);
        set(&mut self.expiration_date, changes.expiration_date);
        set(&mut self.barcode, changes.barcode);
        set(&mut self.brand, changes.brand);
        set(&mut self.image_url, changes.image_url);
        set(&mut self.notes, changes.notes);
        set(&mut self.ingredients, changes.ingredients);
        set(&mut self.nutritional_info, changes.nutritional_info);
        self.updated_at = Utc::now();
    }
}

/// Validated input for a new item.
///
/// Text fields are expected to be trimmed already, with blanks collapsed to
/// `None`. An expiration date before the purchase date is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    /// Item name.
    pub name: ItemName,
    /// Amount held.
    pub quantity: Quantity,
    /// Free-form description.
    pub description: Option<String>,
    /// Unit for `quantity`.
    pub unit: Option<String>,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Optional storage location.
    pub location_id: Option<LocationId>,
    /// Date of purchase.
    pub purchase_date: Option<NaiveDate>,
    /// Best-before or use-by date.
    pub expiration_date: Option<NaiveDate>,
    /// Product barcode.
    pub barcode: Option<String>,
    /// Brand name.
    pub brand: Option<String>,
    /// Product image.
    pub image_url: Option<String>,
    /// Household notes.
    pub notes: Option<String>,
    /// Ingredient text checked for allergens.
    pub ingredients: Option<String>,
    /// Free-form nutrition text.
    pub nutritional_info: Option<String>,
}

impl ItemDraft {
    /// Draft with only the required fields set.
    #[must_use]
    pub const fn new(name: ItemName, quantity: Quantity) -> Self {
        Self {
            name,
            quantity,
            description: None,
            unit: None,
            category_id: None,
            location_id: None,
            purchase_date: None,
            expiration_date: None,
            barcode: None,
            brand: None,
            image_url: None,
            notes: None,
            ingredients: None,
            nutritional_info: None,
        }
    }
}

/// Partial item update. Outer `None` leaves a field unchanged and
/// `Some(None)` clears an optional one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    /// Replacement name.
    pub name: Option<ItemName>,
    /// Replacement quantity.
    pub quantity: Option<Quantity>,
    /// Replacement description.
    pub description: Option<Option<String>>,
    /// Replacement unit.
    pub unit: Option<Option<String>>,
    /// Replacement category.
    pub category_id: Option<Option<CategoryId>>,
    /// Replacement storage location.
    pub location_id: Option<Option<LocationId>>,
    /// Replacement purchase date.
    pub purchase_date: Option<Option<NaiveDate>>,
    /// Replacement expiration date.
    pub expiration_date: Option<Option<NaiveDate>>,
    /// Replacement barcode.
    pub barcode: Option<Option<String>>,
    /// Replacement brand.
    pub brand: Option<Option<String>>,
    /// Replacement image.
    pub image_url: Option<Option<String>>,
    /// Replacement notes.
    pub notes: Option<Option<String>>,
    /// Replacement ingredient text.
    pub ingredients: Option<Option<String>>,
    /// Replacement nutrition text.
    pub nutritional_info: Option<Option<String>>,
}

/// Column used to order item listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemSortField {
    /// Alphabetical by name.
    Name,
    /// By expiration date, undated items after dated ones when ascending.
    ExpirationDate,
    /// By creation time.
    #[default]
    CreatedAt,
    /// By quantity.
    Quantity,
}

/// Direction of an item listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

/// Filters, ordering and paging for an item listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Page number and size.
    pub page: PageRequest,
    /// Case-insensitive substring matched against name, description and brand.
    pub search: Option<String>,
    /// Only items in this category.
    pub category_id: Option<CategoryId>,
    /// Only items in this location.
    pub location_id: Option<LocationId>,
    /// Ordering column.
    pub sort_by: ItemSortField,
    /// Ordering direction.
    pub sort_order: SortOrder,
}

impl ItemQuery {
    /// Whether `item` passes the filters. Paging is not considered.
    #[must_use]
    pub fn matches(&self, item: &InventoryItem) -> bool {
        if self.category_id.is_some() && item.category_id != self.category_id {
            return false;
        }
        if self.location_id.is_some() && item.location_id != self.location_id {
            return false;
        }
        let Some(needle) = self.search.as_deref().map(str::to_lowercase) else {
            return true;
        };
        [
            Some(item.name.as_ref()),
            item.description.as_deref(),
            item.brand.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Listing order. Missing expiration dates sort last ascending and first
    /// descending; ties fall back to the item id.
    #[must_use]
    pub fn compare(&self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        let primary = match self.sort_by {
            ItemSortField::Name => a.name.as_ref().cmp(b.name.as_ref()),
            ItemSortField::ExpirationDate => nulls_last(a.expiration_date, b.expiration_date),
            ItemSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            ItemSortField::Quantity => a.quantity.cmp(&b.quantity),
        };
        let directed = match self.sort_order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        directed.then_with(|| a.id.cmp(&b.id))
    }
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left.cmp(&right),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// An item together with the household allergens found in its ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    /// The stored item.
    #[serde(flatten)]
    pub item: InventoryItem,
    /// Household allergen terms found in the ingredients.
    #[schema(example = json!(["peanut"]))]
    pub allergen_warnings: Vec<String>,
}

impl ItemView {
    /// Run allergen detection for `item` against `allergens`.
    #[must_use]
    pub fn annotate(item: InventoryItem, allergens: &[Allergen]) -> Self {
        let allergen_warnings = detect_allergens(item.ingredients.as_deref(), allergens);
        Self {
            item,
            allergen_warnings,
        }
    }
}
