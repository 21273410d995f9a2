//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain values
//! re-validate stored text, so a corrupt row surfaces as a query error
//! rather than an invalid entity.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Allergen, AllergenId, AllergenName, Category, CategoryId, DisplayName, Email, Household,
    HouseholdId, HouseholdName, InventoryItem, InventoryItemId, ItemName, Location, LocationId,
    LocationName, Membership, MembershipId, Quantity, StoredRole, User, UserId,
};

use super::schema::{
    categories, household_allergens, household_memberships, households, inventory_items,
    locations, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email).map_err(|err| format!("user {}: {err}", row.id))?;
        let display_name =
            DisplayName::new(&row.display_name).map_err(|err| format!("user {}: {err}", row.id))?;
        Ok(Self::new(UserId::from_uuid(row.id), email, display_name))
    }
}

/// Row struct for the households table, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = households)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HouseholdRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Household> for HouseholdRow {
    fn from(household: &Household) -> Self {
        Self {
            id: *household.id.as_uuid(),
            name: household.name.to_string(),
            description: household.description.clone(),
            created_at: household.created_at,
            updated_at: household.updated_at,
        }
    }
}

impl TryFrom<HouseholdRow> for Household {
    type Error = String;

    fn try_from(row: HouseholdRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: HouseholdId::from_uuid(row.id),
            name: HouseholdName::new(&row.name).map_err(|err| format!("household {}: {err}", row.id))?,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Changeset for household edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = households)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct HouseholdUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for the household_memberships table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = household_memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MembershipRow {
    pub id: Uuid,
    pub household_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

impl From<&Membership> for MembershipRow {
    fn from(membership: &Membership) -> Self {
        Self {
            id: *membership.id.as_uuid(),
            household_id: *membership.household_id.as_uuid(),
            user_id: *membership.user_id.as_uuid(),
            role: membership.role.as_str().to_owned(),
            joined_at: membership.joined_at,
        }
    }
}

impl TryFrom<MembershipRow> for Membership {
    type Error = String;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let role = StoredRole::new(row.role)
            .parse()
            .map_err(|err| format!("membership {}: {err}", row.id))?;
        Ok(Self {
            id: MembershipId::from_uuid(row.id),
            household_id: HouseholdId::from_uuid(row.household_id),
            user_id: UserId::from_uuid(row.user_id),
            role,
            joined_at: row.joined_at,
        })
    }
}

/// Row struct for the household_allergens table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = household_allergens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AllergenRow {
    pub id: Uuid,
    pub household_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Allergen> for AllergenRow {
    fn from(allergen: &Allergen) -> Self {
        Self {
            id: *allergen.id.as_uuid(),
            household_id: *allergen.household_id.as_uuid(),
            name: allergen.name.as_ref().to_owned(),
            created_at: allergen.created_at,
        }
    }
}

impl TryFrom<AllergenRow> for Allergen {
    type Error = String;

    fn try_from(row: AllergenRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AllergenId::from_uuid(row.id),
            household_id: HouseholdId::from_uuid(row.household_id),
            name: AllergenName::new(&row.name).map_err(|err| format!("allergen {}: {err}", row.id))?,
            created_at: row.created_at,
        })
    }
}

/// Row struct for reading categories.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            description: row.description,
            icon: row.icon,
        }
    }
}

/// Row struct for the locations table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: Uuid,
    pub household_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Location> for LocationRow {
    fn from(location: &Location) -> Self {
        Self {
            id: *location.id.as_uuid(),
            household_id: *location.household_id.as_uuid(),
            name: location.name.to_string(),
            description: location.description.clone(),
            icon: location.icon.clone(),
            created_at: location.created_at,
            updated_at: location.updated_at,
        }
    }
}

impl TryFrom<LocationRow> for Location {
    type Error = String;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LocationId::from_uuid(row.id),
            household_id: HouseholdId::from_uuid(row.household_id),
            name: LocationName::new(&row.name).map_err(|err| format!("location {}: {err}", row.id))?,
            description: row.description,
            icon: row.icon,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Changeset for location edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = locations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct LocationUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for the inventory_items table.
///
/// Also used as the full-row changeset: every column except the key is
/// rewritten on update, with `None` clearing the column.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = inventory_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub household_id: Uuid,
    pub category_id: Option<i32>,
    pub location_id: Option<Uuid>,
    pub added_by: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub quantity_hundredths: i64,
    pub unit: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub barcode: Option<String>,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub ingredients: Option<String>,
    pub nutritional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&InventoryItem> for ItemRow {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: *item.id.as_uuid(),
            household_id: *item.household_id.as_uuid(),
            category_id: item.category_id.map(CategoryId::get),
            location_id: item.location_id.map(|id| *id.as_uuid()),
            added_by: *item.added_by.as_uuid(),
            name: item.name.to_string(),
            description: item.description.clone(),
            quantity_hundredths: item.quantity.hundredths(),
            unit: item.unit.clone(),
            purchase_date: item.purchase_date,
            expiration_date: item.expiration_date,
            barcode: item.barcode.clone(),
            brand: item.brand.clone(),
            image_url: item.image_url.clone(),
            notes: item.notes.clone(),
            ingredients: item.ingredients.clone(),
            nutritional_info: item.nutritional_info.clone(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl TryFrom<ItemRow> for InventoryItem {
    type Error = String;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Self {
            id: InventoryItemId::from_uuid(id),
            household_id: HouseholdId::from_uuid(row.household_id),
            category_id: row.category_id.map(CategoryId::new),
            location_id: row.location_id.map(LocationId::from_uuid),
            added_by: UserId::from_uuid(row.added_by),
            name: ItemName::new(&row.name).map_err(|err| format!("item {id}: {err}"))?,
            description: row.description,
            quantity: Quantity::from_hundredths(row.quantity_hundredths)
                .map_err(|err| format!("item {id}: {err}"))?,
            unit: row.unit,
            purchase_date: row.purchase_date,
            expiration_date: row.expiration_date,
            barcode: row.barcode,
            brand: row.brand,
            image_url: row.image_url,
            notes: row.notes,
            ingredients: row.ingredients,
            nutritional_info: row.nutritional_info,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
