//! Port for household allergen persistence.

use async_trait::async_trait;

use crate::domain::{Allergen, AllergenId, HouseholdId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by allergen repository adapters.
    pub enum AllergenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "allergen repository connection failed: {message}" => service_unavailable,
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "allergen repository query failed: {message}" => internal,
        /// The household already tracks an allergen with this name.
        Duplicate { name: String } =>
            "allergen {name} already exists in this household" => conflict,
    }
}

/// Storage for allergen terms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllergenRepository: Send + Sync {
    /// Allergens of a household ordered by name.
    async fn list_for_household(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Allergen>, AllergenRepositoryError>;

    /// Fetch one allergen by id.
    async fn find(&self, id: &AllergenId) -> Result<Option<Allergen>, AllergenRepositoryError>;

    /// Insert an allergen. Names are unique per household.
    async fn create(&self, allergen: &Allergen) -> Result<(), AllergenRepositoryError>;

    /// Delete an allergen. Returns `false` when absent.
    async fn delete(&self, id: &AllergenId) -> Result<bool, AllergenRepositoryError>;
}
