//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, update this file alongside it (or
//! regenerate it with `diesel print-schema`).

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Lower-cased, unique.
        email -> Varchar,
        display_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Households: the tenant boundary.
    households (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// (household, user, role) associations; unique per pair.
    household_memberships (id) {
        id -> Uuid,
        household_id -> Uuid,
        user_id -> Uuid,
        /// Checked against `admin`, `editor` and `viewer` by the database.
        role -> Varchar,
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Allergen terms tracked per household; names unique per household.
    household_allergens (id) {
        id -> Uuid,
        household_id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Global, read-only item categories seeded by the initial migration.
    categories (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        icon -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Storage locations; names unique per household.
    locations (id) {
        id -> Uuid,
        household_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        icon -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Inventory items.
    inventory_items (id) {
        id -> Uuid,
        household_id -> Uuid,
        category_id -> Nullable<Int4>,
        location_id -> Nullable<Uuid>,
        added_by -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        /// Quantity in hundredths of a unit.
        quantity_hundredths -> Int8,
        unit -> Nullable<Varchar>,
        purchase_date -> Nullable<Date>,
        expiration_date -> Nullable<Date>,
        barcode -> Nullable<Varchar>,
        brand -> Nullable<Varchar>,
        image_url -> Nullable<Text>,
        notes -> Nullable<Text>,
        ingredients -> Nullable<Text>,
        nutritional_info -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(household_memberships -> households (household_id));
diesel::joinable!(household_memberships -> users (user_id));
diesel::joinable!(household_allergens -> households (household_id));
diesel::joinable!(locations -> households (household_id));
diesel::joinable!(inventory_items -> households (household_id));
diesel::joinable!(inventory_items -> categories (category_id));
diesel::joinable!(inventory_items -> locations (location_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    households,
    household_memberships,
    household_allergens,
    categories,
    locations,
    inventory_items,
);
