//! Global item categories.
//!
//! Categories are a fixed catalogue shared by every household. Storage seeds
//! [`DEFAULT_CATEGORIES`] and nothing in the API mutates them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category identifier assigned by storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CategoryId(i32);

impl CategoryId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// An item category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    #[schema(example = "Dairy")]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional emoji or icon name.
    #[schema(example = "🥛")]
    pub icon: Option<String>,
}

/// Seeded categories as `(name, description, icon)`, in identifier order.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 15] = [
    ("Fruits", "Fresh and dried fruits", "🍎"),
    ("Vegetables", "Fresh vegetables and greens", "🥬"),
    ("Dairy", "Milk, cheese, yogurt, and dairy products", "🥛"),
    ("Meat", "Fresh and frozen meat products", "🥩"),
    ("Poultry", "Chicken, turkey, and other poultry", "🍗"),
    ("Seafood", "Fish and seafood products", "🐟"),
    ("Grains", "Rice, pasta, bread, and grain products", "🌾"),
    ("Canned Goods", "Canned vegetables, fruits, and other preserved items", "🥫"),
    ("Beverages", "Drinks, juices, and liquid refreshments", "🥤"),
    ("Condiments", "Sauces, dressings, and flavor enhancers", "🧂"),
    ("Snacks", "Chips, crackers, and snack foods", "🍿"),
    ("Frozen Foods", "Frozen meals and ingredients", "❄️"),
    ("Baking", "Flour, sugar, baking ingredients", "🧁"),
    ("Spices", "Herbs, spices, and seasonings", "🌶️"),
    ("Other", "Miscellaneous items", "📦"),
];

/// Build the default catalogue with sequential identifiers starting at 1.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    (1_i32..)
        .zip(DEFAULT_CATEGORIES)
        .map(|(id, (name, description, icon))| Category {
            id: CategoryId::new(id),
            name: name.to_owned(),
            description: Some(description.to_owned()),
            icon: Some(icon.to_owned()),
        })
        .collect()
}
