//! Household allergen terms and ingredient matching.
//!
//! An [`Allergen`] is a free-text term a household wants to be warned about.
//! [`detect_allergens`] checks an item's ingredient text against the
//! household's terms and returns the names that occur in it.
//!
//! Matching rules:
//! - Case-insensitive. Both sides are lowercased before comparison.
//! - Prefix-strict: the character before a match must be absent or
//!   non-alphanumeric, so "soy" never matches inside "nonsoy".
//! - Suffix-permissive: the character after a match must be absent or
//!   non-alphanumeric, except that a trailing `s` or `es` followed by such a
//!   boundary is also accepted. "peanut" matches "peanuts" and
//!   "peanut butter", while "soy" does not match "soybeans".
//! - No stemming or synonym expansion: "dairy" does not match "milk".

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::values::uuid_identifier;
use crate::domain::{FieldError, HouseholdId};

/// Maximum allowed length for an allergen term.
pub const ALLERGEN_NAME_MAX: usize = 100;

/// Suffixes tolerated after a matched term before the closing boundary.
const TOLERATED_SUFFIXES: [&str; 2] = ["es", "s"];

/// Validation errors returned by [`AllergenName::new`].
///
/// # Examples
/// ```
/// use pantrie::domain::{AllergenName, AllergenValidationError, ALLERGEN_NAME_MAX};
///
/// assert_eq!(
///     AllergenName::new("   "),
///     Err(AllergenValidationError::EmptyName)
/// );
/// assert_eq!(
///     AllergenName::new("x".repeat(ALLERGEN_NAME_MAX + 1)),
///     Err(AllergenValidationError::NameTooLong { max: ALLERGEN_NAME_MAX })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllergenValidationError {
    /// The name was blank after trimming.
    EmptyName,
    /// The name exceeded the permitted length.
    NameTooLong {
        /// Longest accepted name, in characters.
        max: usize,
    },
}

impl fmt::Display for AllergenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "allergen name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "allergen name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AllergenValidationError {}

impl From<AllergenValidationError> for FieldError {
    fn from(err: AllergenValidationError) -> Self {
        match err {
            AllergenValidationError::EmptyName => Self::Empty { field: "name" },
            AllergenValidationError::NameTooLong { max } => Self::TooLong { field: "name", max },
        }
    }
}

uuid_identifier!(
    /// Stable allergen identifier.
    AllergenId
);

/// Normalised allergen term.
///
/// ## Invariants
/// - Trimmed and lowercased.
/// - Between 1 and [`ALLERGEN_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AllergenName(String);

impl AllergenName {
    /// Normalise and validate a raw allergen term.
    ///
    /// # Examples
    /// ```
    /// use pantrie::domain::AllergenName;
    ///
    /// let name = AllergenName::new("  Peanut ").unwrap();
    /// assert_eq!(name.as_ref(), "peanut");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AllergenValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(AllergenValidationError::EmptyName);
        }
        if normalised.chars().count() > ALLERGEN_NAME_MAX {
            return Err(AllergenValidationError::NameTooLong {
                max: ALLERGEN_NAME_MAX,
            });
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for AllergenName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AllergenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AllergenName> for String {
    fn from(value: AllergenName) -> Self {
        value.0
    }
}

impl TryFrom<String> for AllergenName {
    type Error = AllergenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Household-scoped allergen term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Allergen {
    /// Allergen identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: AllergenId,
    /// Household owning the term.
    #[schema(value_type = String, format = Uuid)]
    pub household_id: HouseholdId,
    /// The term matched against ingredients.
    #[schema(value_type = String, example = "peanut")]
    pub name: AllergenName,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Allergen {
    /// Create a new allergen for `household_id` with a fresh identifier.
    #[must_use]
    pub fn new(household_id: HouseholdId, name: AllergenName) -> Self {
        Self {
            id: AllergenId::random(),
            household_id,
            name,
            created_at: Utc::now(),
        }
    }
}

/// Return the names of `allergens` that occur in `ingredients`.
///
/// The result follows the order of `allergens` and lists each name at most
/// once. Absent or blank ingredient text yields an empty result.
///
/// # Examples
/// ```
/// use pantrie::domain::{detect_allergens, Allergen, AllergenName, HouseholdId};
///
/// let household = HouseholdId::random();
/// let allergens = [
///     Allergen::new(household, AllergenName::new("peanut").unwrap()),
///     Allergen::new(household, AllergenName::new("dairy").unwrap()),
/// ];
/// let found = detect_allergens(Some("Milk, sugar, peanut butter"), &allergens);
/// assert_eq!(found, vec!["peanut".to_owned()]);
/// ```
#[must_use]
pub fn detect_allergens(ingredients: Option<&str>, allergens: &[Allergen]) -> Vec<String> {
    let Some(text) = ingredients.filter(|text| !text.trim().is_empty()) else {
        return Vec::new();
    };
    if allergens.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_lowercase();
    let mut matched: Vec<String> = Vec::new();
    for allergen in allergens {
        let stored = allergen.name.as_ref();
        if matched.iter().any(|name| name == stored) {
            continue;
        }
        if contains_term(&haystack, &stored.trim().to_lowercase()) {
            matched.push(stored.to_owned());
        }
    }
    matched
}

/// Report whether `term` occurs in `haystack` on word boundaries.
///
/// Both inputs must already be lowercased.
fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(found) = haystack.get(from..).and_then(|rest| rest.find(term)) {
        let start = from + found;
        let end = start + term.len();
        if starts_on_boundary(haystack, start) && ends_on_boundary(haystack.get(end..)) {
            return true;
        }
        // Resume one character later so overlapping candidates are still seen.
        let step = haystack
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        from = start + step;
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

fn starts_on_boundary(haystack: &str, start: usize) -> bool {
    haystack
        .get(..start)
        .and_then(|before| before.chars().next_back())
        .is_none_or(|c| !is_word_char(c))
}

fn ends_on_boundary(after: Option<&str>) -> bool {
    let rest = after.unwrap_or_default();
    is_boundary(rest)
        || TOLERATED_SUFFIXES
            .iter()
            .any(|suffix| rest.strip_prefix(suffix).is_some_and(is_boundary))
}

fn is_boundary(after: &str) -> bool {
    after.chars().next().is_none_or(|c| !is_word_char(c))
}

#[cfg(test)]
mod tests {
    //! Matching behaviour for ingredient text.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn household() -> HouseholdId {
        HouseholdId::random()
    }

    fn allergens(household: HouseholdId, names: &[&str]) -> Vec<Allergen> {
        names
            .iter()
            .map(|name| Allergen::new(household, AllergenName::new(name).expect("valid name")))
            .collect()
    }

    #[rstest]
    fn empty_allergen_list_yields_nothing() {
        assert!(detect_allergens(Some("peanuts, soy"), &[]).is_empty());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn absent_ingredients_yield_nothing(household: HouseholdId, #[case] text: Option<&str>) {
        let terms = allergens(household, &["peanut"]);
        assert!(detect_allergens(text, &terms).is_empty());
    }

    #[rstest]
    #[case("peanut", "Roasted peanut oil", true)]
    #[case("peanut", "Contains PEANUTS", true)]
    #[case("peanut", "peanut butter", true)]
    #[case("peanut", "peanut", true)]
    #[case("wheat", "whole-wheat flour", true)]
    #[case("egg", "eggs (free range)", true)]
    #[case("peach", "dried peaches", true)]
    #[case("soy", "soybeans", false)]
    #[case("soy", "nonsoy emulsifier", false)]
    #[case("nut", "coconut milk", false)]
    #[case("nut", "nutmeg", false)]
    #[case("milk", "buttermilk", false)]
    #[case("dairy", "Milk, sugar", false)]
    #[case("tree nut", "may contain tree nuts", true)]
    fn word_boundary_rules(
        household: HouseholdId,
        #[case] term: &str,
        #[case] text: &str,
        #[case] expected: bool,
    ) {
        let terms = allergens(household, &[term]);
        let found = detect_allergens(Some(text), &terms);
        assert_eq!(!found.is_empty(), expected, "term {term:?} in {text:?}");
    }

    #[rstest]
    fn configured_compound_term_matches_where_shorter_term_does_not(household: HouseholdId) {
        let terms = allergens(household, &["soy", "soybean"]);
        let found = detect_allergens(Some("Water, soybeans, salt"), &terms);
        assert_eq!(found, vec!["soybean".to_owned()]);
    }

    #[rstest]
    fn repeated_occurrences_are_reported_once(household: HouseholdId) {
        let terms = allergens(household, &["soy"]);
        let found = detect_allergens(Some("soy sauce, soy lecithin"), &terms);
        assert_eq!(found, vec!["soy".to_owned()]);
    }

    #[rstest]
    fn result_preserves_allergen_order(household: HouseholdId) {
        let terms = allergens(household, &["wheat", "egg", "milk"]);
        let found = detect_allergens(Some("milk, eggs, wheat flour"), &terms);
        assert_eq!(found, vec!["wheat".to_owned(), "egg".to_owned(), "milk".to_owned()]);
    }

    #[rstest]
    fn literal_terms_only_without_semantic_inference(household: HouseholdId) {
        let terms = allergens(household, &["peanut", "dairy"]);
        let found = detect_allergens(Some("Milk, sugar, peanut butter"), &terms);
        assert_eq!(found, vec!["peanut".to_owned()]);
    }

    #[rstest]
    fn later_occurrence_matches_after_rejected_one(household: HouseholdId) {
        let terms = allergens(household, &["soy"]);
        let found = detect_allergens(Some("soybeans and soy"), &terms);
        assert_eq!(found, vec!["soy".to_owned()]);
    }

    #[rstest]
    fn mixed_case_stored_terms_still_match(household: HouseholdId) {
        let mut terms = allergens(household, &["sesame"]);
        if let Some(first) = terms.first_mut() {
            first.name = AllergenName("Sesame".to_owned());
        }
        let found = detect_allergens(Some("SESAME SEEDS"), &terms);
        assert_eq!(found, vec!["Sesame".to_owned()]);
    }

    #[rstest]
    fn non_ascii_text_respects_boundaries(household: HouseholdId) {
        let terms = allergens(household, &["crème"]);
        assert_eq!(
            detect_allergens(Some("Crème fraîche"), &terms),
            vec!["crème".to_owned()]
        );
        assert!(detect_allergens(Some("écrème"), &terms).is_empty());
    }

    #[rstest]
    #[case("  Peanut  ", Ok("peanut"))]
    #[case("TREE NUT", Ok("tree nut"))]
    #[case("   ", Err(AllergenValidationError::EmptyName))]
    fn names_are_normalised(
        #[case] raw: &str,
        #[case] expected: Result<&str, AllergenValidationError>,
    ) {
        let result = AllergenName::new(raw);
        assert_eq!(result.as_ref().map(AsRef::as_ref), expected.as_ref().map(|s| *s));
    }

    #[rstest]
    fn overlong_names_are_rejected() {
        let raw = "a".repeat(ALLERGEN_NAME_MAX + 1);
        assert_eq!(
            AllergenName::new(raw),
            Err(AllergenValidationError::NameTooLong {
                max: ALLERGEN_NAME_MAX
            })
        );
    }
}
