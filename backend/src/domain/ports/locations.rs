//! Driving ports for storage locations.

use async_trait::async_trait;

use crate::domain::{Error, HouseholdId, Location, LocationChanges, LocationDraft, LocationId, UserId};

/// Location mutations. All require item mutation rights.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationCommand: Send + Sync {
    /// Add a location to a household.
    async fn create(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        draft: LocationDraft,
    ) -> Result<Location, Error>;

    /// Change a location.
    async fn update(
        &self,
        actor: &UserId,
        location_id: &LocationId,
        changes: LocationChanges,
    ) -> Result<Location, Error>;

    /// Delete a location.
    async fn delete(&self, actor: &UserId, location_id: &LocationId) -> Result<(), Error>;
}

/// Location reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationQuery: Send + Sync {
    /// Locations of a household, ordered by name.
    async fn list(&self, actor: &UserId, household_id: &HouseholdId)
    -> Result<Vec<Location>, Error>;

    /// One location.
    async fn get(&self, actor: &UserId, location_id: &LocationId) -> Result<Location, Error>;
}
