//! Product metadata returned by barcode lookups.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shortest accepted barcode.
pub const BARCODE_MIN: usize = 4;
/// Longest accepted barcode.
pub const BARCODE_MAX: usize = 32;

/// Short joining words kept lowercase by [`format_ingredients`].
const LOWERCASE_WORDS: [&str; 16] = [
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "of", "on", "or", "the", "to",
    "with",
];

/// Reasons a barcode is rejected before any lookup is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BarcodeError {
    #[error("barcode must contain only digits")]
    NonDigit,
    #[error("barcode must be between {min} and {max} digits")]
    Length { min: usize, max: usize },
}

/// A product barcode (EAN, UPC and similar): ASCII digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode(String);

impl Barcode {
    /// Validate a raw barcode, ignoring surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use pantrie::domain::Barcode;
    ///
    /// assert!(Barcode::new("3017620422003").is_ok());
    /// assert!(Barcode::new("30176-20422003").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BarcodeError> {
        let trimmed = raw.as_ref().trim();
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BarcodeError::NonDigit);
        }
        if !(BARCODE_MIN..=BARCODE_MAX).contains(&trimmed.len()) {
            return Err(BarcodeError::Length {
                min: BARCODE_MIN,
                max: BARCODE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Barcode> for String {
    fn from(value: Barcode) -> Self {
        value.0
    }
}

impl TryFrom<String> for Barcode {
    type Error = BarcodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Product details suitable for pre-filling a new inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    /// Barcode looked up.
    #[schema(value_type = String, example = "3017620422003")]
    pub barcode: Barcode,
    /// Product name, or a placeholder when the catalogue has none.
    #[schema(example = "Nutella")]
    pub name: String,
    /// Generic product description.
    pub description: Option<String>,
    /// Brand names.
    pub brand: Option<String>,
    /// Catalogue categories.
    pub categories: Vec<String>,
    /// Front image.
    pub image_url: Option<String>,
    /// Pack size as printed, such as `400 g`.
    pub quantity: Option<String>,
    /// Serving size as printed.
    pub serving_size: Option<String>,
    /// Ingredient text.
    pub ingredients: Option<String>,
    /// Allergens declared by the catalogue.
    #[schema(example = "Milk, Nuts, Soybeans")]
    pub allergens: Option<String>,
    /// Nutri-Score grade.
    pub nutrition_grade: Option<String>,
    /// Nutrient values keyed by nutrient name, e.g. `calories` or `protein`.
    pub nutrition_facts: BTreeMap<String, f64>,
    /// Certification labels.
    pub labels: Vec<String>,
    /// Stores selling the product.
    pub stores: Option<String>,
    /// Countries where it is sold.
    pub countries: Option<String>,
    /// Name of the product catalogue.
    #[schema(example = "Open Food Facts")]
    pub source: String,
    /// Catalogue page for the product.
    pub source_url: String,
}

/// Turn taxonomy tags such as `en:soybeans` into `"Soybeans"`, joined by
/// `", "`. Returns `None` when there are no tags.
///
/// ```
/// use pantrie::domain::format_allergen_tags;
///
/// let tags = ["en:milk".to_owned(), "en:tree-nuts".to_owned()];
/// assert_eq!(format_allergen_tags(&tags).as_deref(), Some("Milk, Tree Nuts"));
/// ```
#[must_use]
pub fn format_allergen_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    let names: Vec<String> = tags
        .iter()
        .map(|tag| {
            let bare = tag.rsplit(':').next().unwrap_or(tag.as_str());
            title_case(&bare.replace('-', " "))
        })
        .collect();
    Some(names.join(", "))
}

/// Rewrite upper-case ingredient lists in sentence-style capitalisation.
///
/// Sentences are split on `". "`. The first word of each sentence and every
/// word not in the small joining-word list is capitalised; joining words are
/// lowercased.
#[must_use]
pub fn format_ingredients(raw: Option<&str>) -> Option<String> {
    let text = raw.filter(|value| !value.trim().is_empty())?;
    let sentences: Vec<String> = text
        .split(". ")
        .map(|sentence| {
            sentence
                .split_whitespace()
                .enumerate()
                .map(|(position, word)| {
                    let lower = word.to_lowercase();
                    if position > 0 && LOWERCASE_WORDS.contains(&lower.as_str()) {
                        lower
                    } else {
                        capitalise(word)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Some(sentences.join(". "))
}

/// Upper-case the first character and lower-case the rest.
fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Capitalise the first letter after every non-letter, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12345678", Ok(()))]
    #[case(" 0123456789012 ", Ok(()))]
    #[case("123", Err(BarcodeError::Length { min: BARCODE_MIN, max: BARCODE_MAX }))]
    #[case(&"9".repeat(33), Err(BarcodeError::Length { min: BARCODE_MIN, max: BARCODE_MAX }))]
    #[case("12a45678", Err(BarcodeError::NonDigit))]
    #[case("../etc", Err(BarcodeError::NonDigit))]
    fn barcodes_are_digit_strings(#[case] raw: &str, #[case] expected: Result<(), BarcodeError>) {
        assert_eq!(Barcode::new(raw).map(|_| ()), expected);
    }

    #[rstest]
    #[case(&["en:milk", "en:soybeans"], Some("Milk, Soybeans"))]
    #[case(&["fr:fruits-a-coque"], Some("Fruits A Coque"))]
    #[case(&["gluten"], Some("Gluten"))]
    #[case(&[], None)]
    fn allergen_tags_are_humanised(#[case] tags: &[&str], #[case] expected: Option<&str>) {
        let owned: Vec<String> = tags.iter().map(|t| (*t).to_owned()).collect();
        assert_eq!(format_allergen_tags(&owned).as_deref(), expected);
    }

    #[rstest]
    #[case("SUGAR, PALM OIL, HAZELNUTS", "Sugar, Palm Oil, Hazelnuts")]
    #[case("WATER AND SALT. MAY CONTAIN TRACES OF NUTS", "Water and Salt. May Contain Traces of Nuts")]
    #[case("the cocoa", "The Cocoa")]
    fn ingredients_lose_their_shouting(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_ingredients(Some(raw)).as_deref(), Some(expected));
    }

    #[rstest]
    fn blank_ingredients_are_absent() {
        assert!(format_ingredients(Some("  ")).is_none());
        assert!(format_ingredients(None).is_none());
    }
}
