//! Household roles and the capability table that governs them.
//!
//! Roles never inherit from each other. Each role has its own row in
//! [`authorize`], and every action is listed explicitly in every row, so
//! adding an action fails to compile until each role has been given an
//! answer for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role a user holds within one household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HouseholdRole {
    /// Read-only access to items, locations and allergens.
    Viewer,
    /// May add, change and remove items and locations.
    Editor,
    /// Full control including settings and membership.
    Admin,
}

impl HouseholdRole {
    /// Persisted string form of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for HouseholdRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HouseholdRole {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole {
                raw: other.to_owned(),
            }),
        }
    }
}

/// A stored role value that matches no known [`HouseholdRole`].
///
/// Seeing this means a membership record is corrupt. Callers log it and deny.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown household role {raw:?}")]
pub struct UnknownRole {
    raw: String,
}

impl UnknownRole {
    /// The offending stored value.
    #[must_use]
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }
}

/// Role value exactly as persisted, before it has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRole(String);

impl StoredRole {
    /// Wrap a raw role value read from storage.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw stored value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Interpret the stored value as a [`HouseholdRole`].
    pub fn parse(&self) -> Result<HouseholdRole, UnknownRole> {
        self.0.parse()
    }
}

impl From<HouseholdRole> for StoredRole {
    fn from(role: HouseholdRole) -> Self {
        Self(role.as_str().to_owned())
    }
}

/// Operation a member attempts inside a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseholdAction {
    /// Read items, locations, allergens and the member list.
    ViewItems,
    /// Create, update or delete items and locations.
    MutateItems,
    /// Rename or delete the household and manage its allergen list.
    ManageSettings,
    /// Invite, re-role or remove members.
    ManageMembers,
}

impl HouseholdAction {
    /// Stable name used in logs and error details.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ViewItems => "view_items",
            Self::MutateItems => "mutate_items",
            Self::ManageSettings => "manage_settings",
            Self::ManageMembers => "manage_members",
        }
    }
}

impl fmt::Display for HouseholdAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict returned by [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The role may perform the action.
    Permit,
    /// The role may not perform the action.
    Deny,
}

impl AccessDecision {
    /// Whether the action may proceed.
    #[must_use]
    pub const fn is_permitted(self) -> bool {
        matches!(self, Self::Permit)
    }
}

/// Look up whether `role` may perform `action`.
///
/// # Examples
/// ```
/// use pantrie::domain::{authorize, AccessDecision, HouseholdAction, HouseholdRole};
///
/// assert_eq!(
///     authorize(HouseholdRole::Editor, HouseholdAction::MutateItems),
///     AccessDecision::Permit,
/// );
/// assert_eq!(
///     authorize(HouseholdRole::Editor, HouseholdAction::ManageSettings),
///     AccessDecision::Deny,
/// );
/// ```
#[must_use]
pub const fn authorize(role: HouseholdRole, action: HouseholdAction) -> AccessDecision {
    use AccessDecision::{Deny, Permit};
    use HouseholdAction::{ManageMembers, ManageSettings, MutateItems, ViewItems};

    match role {
        HouseholdRole::Viewer => match action {
            ViewItems => Permit,
            MutateItems | ManageSettings | ManageMembers => Deny,
        },
        HouseholdRole::Editor => match action {
            ViewItems | MutateItems => Permit,
            ManageSettings | ManageMembers => Deny,
        },
        HouseholdRole::Admin => match action {
            ViewItems | MutateItems | ManageSettings | ManageMembers => Permit,
        },
    }
}

/// Authorize a role value read from storage.
///
/// Unknown values never permit anything; they come back as [`UnknownRole`]
/// so the caller can log the corrupt record.
pub fn authorize_stored_role(
    stored: &StoredRole,
    action: HouseholdAction,
) -> Result<AccessDecision, UnknownRole> {
    stored.parse().map(|role| authorize(role, action))
}
