//! Port for household membership persistence.
//!
//! [`MembershipRepository::find_role`] returns the role exactly as stored so
//! the access guard can tell a corrupt value apart from a real role.

use async_trait::async_trait;

use crate::domain::{HouseholdId, HouseholdRole, Member, Membership, MembershipId, StoredRole, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by membership repository adapters.
    pub enum MembershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "membership repository connection failed: {message}" => service_unavailable,
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "membership repository query failed: {message}" => internal,
        /// The user already belongs to the household.
        Duplicate { message: String } =>
            "membership already exists: {message}" => conflict,
    }
}

/// Storage for (household, user, role) associations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Stored role of `user_id` in `household_id`, or `None` for non-members.
    async fn find_role(
        &self,
        household_id: &HouseholdId,
        user_id: &UserId,
    ) -> Result<Option<StoredRole>, MembershipRepositoryError>;

    /// Fetch one membership by id.
    async fn find(&self, id: &MembershipId)
    -> Result<Option<Membership>, MembershipRepositoryError>;

    /// Members of a household with their profiles, oldest first.
    async fn list_members(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Member>, MembershipRepositoryError>;

    /// Insert a membership. Fails with `Duplicate` if the user is already a member.
    async fn add(&self, membership: &Membership) -> Result<(), MembershipRepositoryError>;

    /// Change a member's role. Returns `false` when the membership is gone.
    async fn update_role(
        &self,
        id: &MembershipId,
        role: HouseholdRole,
    ) -> Result<bool, MembershipRepositoryError>;

    /// Remove a membership. Returns `false` when absent.
    async fn remove(&self, id: &MembershipId) -> Result<bool, MembershipRepositoryError>;
}
