//! Driving ports for household membership management.

use async_trait::async_trait;

use crate::domain::{Email, Error, HouseholdId, HouseholdRole, Member, MembershipId, UserId};

/// Membership mutations. All require member-management rights.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberCommand: Send + Sync {
    /// Add the registered user with `email` to the household.
    async fn add(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        email: Email,
        role: HouseholdRole,
    ) -> Result<Member, Error>;

    /// Give an existing member a different role.
    async fn change_role(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        membership_id: &MembershipId,
        role: HouseholdRole,
    ) -> Result<Member, Error>;

    /// Remove a member from the household.
    async fn remove(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        membership_id: &MembershipId,
    ) -> Result<(), Error>;
}

/// Membership reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberQuery: Send + Sync {
    /// Members of the household.
    async fn list(&self, actor: &UserId, household_id: &HouseholdId)
    -> Result<Vec<Member>, Error>;
}
