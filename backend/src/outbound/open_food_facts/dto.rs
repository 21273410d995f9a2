//! DTOs for decoding Open Food Facts product responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! [`ProductInfo`] in one pass. Upstream data is loosely typed: blank
//! strings count as missing and nutrient values may arrive as numbers or
//! numeric strings.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Barcode, ProductInfo, format_allergen_tags, format_ingredients};

const SOURCE_NAME: &str = "Open Food Facts";
const PRODUCT_PAGE_BASE: &str = "https://world.openfoodfacts.org/product";
const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Reported nutrient name and the Open Food Facts key it is read from.
const NUTRIENTS: [(&str, &str); 17] = [
    ("calories", "energy-kcal"),
    ("total_fat", "fat"),
    ("saturated_fat", "saturated-fat"),
    ("trans_fat", "trans-fat"),
    ("cholesterol", "cholesterol"),
    ("sodium", "sodium"),
    ("total_carbohydrate", "carbohydrates"),
    ("dietary_fiber", "fiber"),
    ("total_sugars", "sugars"),
    ("added_sugars", "added-sugars"),
    ("protein", "proteins"),
    ("vitamin_d", "vitamin-d"),
    ("calcium", "calcium"),
    ("iron", "iron"),
    ("potassium", "potassium"),
    ("vitamin_a", "vitamin-a"),
    ("vitamin_c", "vitamin-c"),
];

#[derive(Debug, Deserialize)]
pub(super) struct LookupResponseDto {
    #[serde(default)]
    status: Value,
    product: Option<ProductDto>,
}

impl LookupResponseDto {
    /// The product when upstream reports a hit, otherwise `None`.
    pub(super) fn into_found(self) -> Option<ProductDto> {
        if self.status.as_i64() == Some(1) {
            self.product
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProductDto {
    code: Option<String>,
    product_name: Option<String>,
    generic_name: Option<String>,
    categories: Option<String>,
    brands: Option<String>,
    #[serde(default)]
    categories_tags: Vec<String>,
    image_url: Option<String>,
    quantity: Option<String>,
    serving_size: Option<String>,
    ingredients_text: Option<String>,
    #[serde(default)]
    allergens_tags: Vec<String>,
    #[serde(default)]
    allergens_hierarchy: Vec<String>,
    nutrition_grade_fr: Option<String>,
    #[serde(default)]
    nutriments: BTreeMap<String, Value>,
    #[serde(default)]
    labels_tags: Vec<String>,
    stores: Option<String>,
    countries: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

impl ProductDto {
    /// Map into domain product details for the barcode that was looked up.
    pub(super) fn into_product_info(self, barcode: &Barcode) -> ProductInfo {
        let nutrition_facts = self.nutrition_facts();
        let allergen_tags = if self.allergens_tags.is_empty() {
            &self.allergens_hierarchy
        } else {
            &self.allergens_tags
        };
        let allergens = format_allergen_tags(allergen_tags);
        let ingredients = format_ingredients(self.ingredients_text.as_deref());
        let code = present(self.code).unwrap_or_else(|| barcode.to_string());
        let generic_name = present(self.generic_name);

        ProductInfo {
            barcode: barcode.clone(),
            name: present(self.product_name)
                .or_else(|| generic_name.clone())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_owned()),
            description: generic_name.or_else(|| present(self.categories)),
            brand: present(self.brands),
            categories: self.categories_tags,
            image_url: present(self.image_url),
            quantity: present(self.quantity),
            serving_size: present(self.serving_size),
            ingredients,
            allergens,
            nutrition_grade: present(self.nutrition_grade_fr),
            nutrition_facts,
            labels: self.labels_tags,
            stores: present(self.stores),
            countries: present(self.countries),
            source: SOURCE_NAME.to_owned(),
            source_url: format!("{PRODUCT_PAGE_BASE}/{code}"),
        }
    }

    /// Per-serving values first, then per-100g, then the bare key. Zero and
    /// missing values are left out.
    fn nutrition_facts(&self) -> BTreeMap<String, f64> {
        NUTRIENTS
            .iter()
            .filter_map(|(reported, key)| {
                [format!("{key}_serving"), format!("{key}_100g"), (*key).to_owned()]
                    .iter()
                    .filter_map(|candidate| self.nutriments.get(candidate).and_then(number))
                    .find(|value| *value != 0.0)
                    .map(|value| ((*reported).to_owned(), value))
            })
            .collect()
    }
}
