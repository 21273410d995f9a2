//! Driving ports for inventory items.
//!
//! Every item returned through these ports is an [`ItemView`] carrying the
//! allergen warnings for its household.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    Error, HouseholdId, InventoryItemId, ItemChanges, ItemDraft, ItemQuery, ItemView, UserId,
};

/// Item mutations. All require item mutation rights.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryCommand: Send + Sync {
    /// Add an item to a household.
    async fn create(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        draft: ItemDraft,
    ) -> Result<ItemView, Error>;

    /// Change an item.
    async fn update(
        &self,
        actor: &UserId,
        item_id: &InventoryItemId,
        changes: ItemChanges,
    ) -> Result<ItemView, Error>;

    /// Delete an item.
    async fn delete(&self, actor: &UserId, item_id: &InventoryItemId) -> Result<(), Error>;
}

/// Item reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryQuery: Send + Sync {
    /// One page of a household's items.
    async fn list(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        query: ItemQuery,
    ) -> Result<Page<ItemView>, Error>;

    /// One item.
    async fn get(&self, actor: &UserId, item_id: &InventoryItemId) -> Result<ItemView, Error>;
}
