//! Named storage locations inside a household, such as "Pantry" or "Freezer".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::values::{bounded_text, optional_text, uuid_identifier};
use crate::domain::{FieldError, HouseholdId};

/// Maximum length of a location description.
pub const LOCATION_DESCRIPTION_MAX: usize = 500;
/// Maximum length of a location icon glyph or name.
pub const LOCATION_ICON_MAX: usize = 50;

uuid_identifier!(
    /// Stable location identifier.
    LocationId
);

bounded_text!(
    /// Location name, unique within its household.
    LocationName,
    field = "name",
    max = 100
);

/// A storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Location identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: LocationId,
    /// Owning household.
    #[schema(value_type = String, format = Uuid)]
    pub household_id: HouseholdId,
    /// Location name, unique within the household.
    #[schema(value_type = String, example = "Pantry")]
    pub name: LocationName,
    /// Optional description.
    pub description: Option<String>,
    /// Optional emoji or icon name.
    #[schema(example = "🥫")]
    pub icon: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Materialise a location in `household_id`.
    #[must_use]
    pub fn create(household_id: HouseholdId, draft: LocationDraft) -> Self {
        let now = Utc::now();
        Self {
            id: LocationId::random(),
            household_id,
            name: draft.name,
            description: draft.description,
            icon: draft.icon,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, changes: LocationChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(icon) = changes.icon {
            self.icon = icon;
        }
        self.updated_at = Utc::now();
    }
}

/// Validated input for a new location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDraft {
    /// Location name.
    pub name: LocationName,
    /// Optional description.
    pub description: Option<String>,
    /// Optional icon.
    pub icon: Option<String>,
}

impl LocationDraft {
    /// Validate raw create input.
    pub fn new(
        name: &str,
        description: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            name: LocationName::new(name)?,
            description: optional_text(description, "description", Some(LOCATION_DESCRIPTION_MAX))?,
            icon: optional_text(icon, "icon", Some(LOCATION_ICON_MAX))?,
        })
    }
}

/// Partial update for a location; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationChanges {
    /// Replacement name.
    pub name: Option<LocationName>,
    /// Replacement description.
    pub description: Option<Option<String>>,
    /// Replacement icon.
    pub icon: Option<Option<String>>,
}

impl LocationChanges {
    /// Validate raw update input.
    pub fn new(
        name: Option<&str>,
        description: Option<Option<&str>>,
        icon: Option<Option<&str>>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            name: name.map(LocationName::new).transpose()?,
            description: description
                .map(|value| optional_text(value, "description", Some(LOCATION_DESCRIPTION_MAX)))
                .transpose()?,
            icon: icon
                .map(|value| optional_text(value, "icon", Some(LOCATION_ICON_MAX)))
                .transpose()?,
        })
    }
}
