//! Driving ports for household use-cases.
//!
//! Every call carries the acting user; implementations authorise against
//! that user's membership before touching storage.

use async_trait::async_trait;

use crate::domain::{
    Error, Household, HouseholdChanges, HouseholdDraft, HouseholdId, HouseholdOverview, UserId,
};

/// Household mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseholdCommand: Send + Sync {
    /// Create a household; `actor` becomes its admin.
    async fn create(
        &self,
        actor: &UserId,
        draft: HouseholdDraft,
    ) -> Result<HouseholdOverview, Error>;

    /// Rename or re-describe a household. Requires settings rights.
    async fn update(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        changes: HouseholdChanges,
    ) -> Result<Household, Error>;

    /// Delete a household and everything it owns. Requires settings rights.
    async fn delete(&self, actor: &UserId, household_id: &HouseholdId) -> Result<(), Error>;
}

/// Household reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseholdQuery: Send + Sync {
    /// Households `actor` belongs to.
    async fn list(&self, actor: &UserId) -> Result<Vec<HouseholdOverview>, Error>;

    /// One household `actor` belongs to.
    async fn get(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
    ) -> Result<HouseholdOverview, Error>;
}
