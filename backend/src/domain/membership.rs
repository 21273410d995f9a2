//! Household membership: which users belong to a household and in what role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::values::uuid_identifier;
use crate::domain::{DisplayName, Email, HouseholdId, HouseholdRole, UserId};

uuid_identifier!(
    /// Stable membership identifier.
    MembershipId
);

/// Association of one user with one household.
///
/// At most one membership exists per (household, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Membership identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: MembershipId,
    /// Household joined.
    #[schema(value_type = String, format = Uuid)]
    pub household_id: HouseholdId,
    /// Member user.
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
    /// Role held in the household.
    pub role: HouseholdRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Start a new membership now.
    #[must_use]
    pub fn join(household_id: HouseholdId, user_id: UserId, role: HouseholdRole) -> Self {
        Self {
            id: MembershipId::random(),
            household_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

/// Membership joined with the member's user profile, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// The membership record.
    #[serde(flatten)]
    pub membership: Membership,
    /// Member's email address.
    #[schema(value_type = String)]
    pub email: Email,
    /// Member's display name.
    #[schema(value_type = String)]
    pub display_name: DisplayName,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn member_listing_flattens_membership() {
        let user = UserId::random();
        let membership = Membership::join(HouseholdId::random(), user.clone(), HouseholdRole::Editor);
        let member = Member {
            membership,
            email: Email::new("ada@example.com").expect("email"),
            display_name: DisplayName::new("Ada").expect("name"),
        };
        let value = serde_json::to_value(&member).expect("serialise");
        assert_eq!(value["userId"], user.as_ref());
        assert_eq!(value["role"], "editor");
        assert_eq!(value["displayName"], "Ada");
    }
}
