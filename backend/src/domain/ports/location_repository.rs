//! Port for storage location persistence.

use async_trait::async_trait;

use crate::domain::{HouseholdId, Location, LocationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by location repository adapters.
    pub enum LocationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "location repository connection failed: {message}" => service_unavailable,
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "location repository query failed: {message}" => internal,
        /// Another location in the household already has this name.
        Duplicate { name: String } =>
            "location {name} already exists in this household" => conflict,
    }
}

/// Storage for household locations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Locations of a household ordered by name.
    async fn list_for_household(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Location>, LocationRepositoryError>;

    /// Fetch one location by id.
    async fn find(&self, id: &LocationId) -> Result<Option<Location>, LocationRepositoryError>;

    /// Insert a location.
    async fn create(&self, location: &Location) -> Result<(), LocationRepositoryError>;

    /// Persist changed fields. Returns `false` when the location is gone.
    async fn update(&self, location: &Location) -> Result<bool, LocationRepositoryError>;

    /// Delete a location. Items keep existing without a location.
    async fn delete(&self, id: &LocationId) -> Result<bool, LocationRepositoryError>;
}
