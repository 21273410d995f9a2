//! Port for household persistence.

use async_trait::async_trait;

use crate::domain::{Household, HouseholdId, Membership, StoredRole, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by household repository adapters.
    pub enum HouseholdRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "household repository connection failed: {message}" => service_unavailable,
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "household repository query failed: {message}" => internal,
    }
}

/// A household listed for one user, with that user's stored role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdListing {
    /// The household record.
    pub household: Household,
    /// Role as stored, possibly unrecognised.
    pub role: StoredRole,
    /// Number of members.
    pub member_count: u64,
}

/// Storage for households.
///
/// Deleting a household removes everything it owns: memberships, allergens,
/// locations and items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseholdRepository: Send + Sync {
    /// Insert `household` together with its founding membership, atomically.
    async fn create(
        &self,
        household: &Household,
        founder: &Membership,
    ) -> Result<(), HouseholdRepositoryError>;

    /// Fetch a household by id.
    async fn find(&self, id: &HouseholdId) -> Result<Option<Household>, HouseholdRepositoryError>;

    /// Households `user_id` belongs to, ordered by name.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<HouseholdListing>, HouseholdRepositoryError>;

    /// Number of members in a household.
    async fn member_count(&self, id: &HouseholdId) -> Result<u64, HouseholdRepositoryError>;

    /// Persist changed fields. Returns `false` when the household is gone.
    async fn update(&self, household: &Household) -> Result<bool, HouseholdRepositoryError>;

    /// Delete a household and everything it owns. Returns `false` when absent.
    async fn delete(&self, id: &HouseholdId) -> Result<bool, HouseholdRepositoryError>;
}
