//! Households: the tenant boundary that owns members, locations, allergens
//! and inventory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::values::{bounded_text, optional_text, uuid_identifier};
use crate::domain::{FieldError, HouseholdRole};

/// Maximum length of a household description.
pub const HOUSEHOLD_DESCRIPTION_MAX: usize = 500;

uuid_identifier!(
    /// Stable household identifier.
    HouseholdId
);

bounded_text!(
    /// Household display name, 1 to 200 characters after trimming.
    HouseholdName,
    field = "name",
    max = 200
);

/// A household record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    /// Household identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: HouseholdId,
    /// Household name.
    #[schema(value_type = String, example = "Riverside Flat")]
    pub name: HouseholdName,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Household {
    /// Materialise a new household from a validated draft.
    #[must_use]
    pub fn create(draft: HouseholdDraft) -> Self {
        let now = Utc::now();
        Self {
            id: HouseholdId::random(),
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, changes: HouseholdChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}

/// Validated input for creating a household.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdDraft {
    /// Household name.
    pub name: HouseholdName,
    /// Optional description.
    pub description: Option<String>,
}

impl HouseholdDraft {
    /// Validate raw create input.
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, FieldError> {
        Ok(Self {
            name: HouseholdName::new(name)?,
            description: optional_text(
                description,
                "description",
                Some(HOUSEHOLD_DESCRIPTION_MAX),
            )?,
        })
    }
}

/// Partial update for a household. `None` leaves a field untouched.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseholdChanges {
    /// Replacement name.
    pub name: Option<HouseholdName>,
    /// Replacement description.
    pub description: Option<Option<String>>,
}

impl HouseholdChanges {
    /// Validate raw update input.
    pub fn new(name: Option<&str>, description: Option<Option<&str>>) -> Result<Self, FieldError> {
        Ok(Self {
            name: name.map(HouseholdName::new).transpose()?,
            description: description
                .map(|value| optional_text(value, "description", Some(HOUSEHOLD_DESCRIPTION_MAX)))
                .transpose()?,
        })
    }
}

/// A household as seen by one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdOverview {
    /// The household record.
    #[serde(flatten)]
    pub household: Household,
    /// The caller's role in this household.
    pub role: HouseholdRole,
    /// Number of members, the caller included.
    pub member_count: u64,
}
