//! Port for inventory item persistence.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{HouseholdId, InventoryItem, InventoryItemId, ItemQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by inventory repository adapters.
    pub enum InventoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "inventory repository connection failed: {message}" => service_unavailable,
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "inventory repository query failed: {message}" => internal,
    }
}

/// Storage for inventory items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// One page of a household's items matching `query`.
    ///
    /// Filtering and ordering follow [`ItemQuery::matches`] and
    /// [`ItemQuery::compare`].
    async fn list(
        &self,
        household_id: &HouseholdId,
        query: &ItemQuery,
    ) -> Result<Page<InventoryItem>, InventoryRepositoryError>;

    /// Fetch one item by id.
    async fn find(
        &self,
        id: &InventoryItemId,
    ) -> Result<Option<InventoryItem>, InventoryRepositoryError>;

    /// Insert an item.
    async fn create(&self, item: &InventoryItem) -> Result<(), InventoryRepositoryError>;

    /// Persist changed fields. Returns `false` when the item is gone.
    async fn update(&self, item: &InventoryItem) -> Result<bool, InventoryRepositoryError>;

    /// Delete an item. Returns `false` when absent.
    async fn delete(&self, id: &InventoryItemId) -> Result<bool, InventoryRepositoryError>;
}
