//! Driving ports for a household's allergen list.

use async_trait::async_trait;

use crate::domain::{Allergen, AllergenId, AllergenName, Error, HouseholdId, UserId};

/// Allergen mutations. Both require settings rights.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllergenCommand: Send + Sync {
    /// Track a new allergen term.
    async fn create(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        name: AllergenName,
    ) -> Result<Allergen, Error>;

    /// Stop tracking an allergen term.
    async fn delete(&self, actor: &UserId, allergen_id: &AllergenId) -> Result<(), Error>;
}

/// Allergen reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllergenQuery: Send + Sync {
    /// Allergens of the household, ordered by name.
    async fn list(&self, actor: &UserId, household_id: &HouseholdId)
    -> Result<Vec<Allergen>, Error>;
}
