//! Inventory item use-cases.
//!
//! Every item leaving this service is annotated with the allergen warnings of
//! its household. References to a location or category are checked before an
//! item is written: a location must belong to the item's household and a
//! category must exist.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AllergenRepository, CategoryRepository, InventoryCommand, InventoryQuery,
    InventoryRepository, LocationRepository, MembershipRepository,
};
use crate::domain::{
    AccessGuard, CategoryId, Error, HouseholdAction, HouseholdId, InventoryItem, InventoryItemId,
    ItemChanges, ItemDraft, ItemQuery, ItemView, LocationId, UserId,
};

/// Repositories the inventory service reads and writes.
pub struct InventoryRepositories<I, A, L, C, M> {
    /// Item storage.
    pub items: Arc<I>,
    /// Per-household allergen lists, read to compute warnings.
    pub allergens: Arc<A>,
    /// Storage locations, checked when an item references one.
    pub locations: Arc<L>,
    /// Categories, checked when an item references one.
    pub categories: Arc<C>,
    /// Membership lookups backing the access guard.
    pub memberships: Arc<M>,
}

/// Inventory service implementing the item driving ports.
pub struct InventoryService<I, A, L, C, M> {
    items: Arc<I>,
    allergens: Arc<A>,
    locations: Arc<L>,
    categories: Arc<C>,
    guard: AccessGuard<M>,
}

impl<I, A, L, C, M> InventoryService<I, A, L, C, M> {
    /// Create a new service over `repos`.
    pub fn new(repos: InventoryRepositories<I, A, L, C, M>) -> Self {
        Self {
            items: repos.items,
            allergens: repos.allergens,
            locations: repos.locations,
            categories: repos.categories,
            guard: AccessGuard::new(repos.memberships),
        }
    }
}

fn invalid_reference(field: &'static str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": "invalid" }))
}

impl<I, A, L, C, M> InventoryService<I, A, L, C, M>
where
    I: InventoryRepository,
    A: AllergenRepository,
    L: LocationRepository,
    C: CategoryRepository,
    M: MembershipRepository,
{
    async fn load(&self, item_id: &InventoryItemId) -> Result<InventoryItem, Error> {
        self.items
            .find(item_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("item {item_id} not found")))
    }

    async fn check_location(
        &self,
        household_id: &HouseholdId,
        location_id: Option<&LocationId>,
    ) -> Result<(), Error> {
        let Some(location_id) = location_id else {
            return Ok(());
        };
        let owned = self
            .locations
            .find(location_id)
            .await?
            .is_some_and(|location| location.household_id == *household_id);
        if owned {
            Ok(())
        } else {
            Err(invalid_reference(
                "locationId",
                format!("location {location_id} does not belong to this household"),
            ))
        }
    }

    async fn check_category(&self, category_id: Option<CategoryId>) -> Result<(), Error> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        if self.categories.find(category_id).await?.is_some() {
            Ok(())
        } else {
            Err(invalid_reference(
                "categoryId",
                format!("category {category_id} does not exist"),
            ))
        }
    }

    async fn annotate(&self, item: InventoryItem) -> Result<ItemView, Error> {
        let allergens = self.allergens.list_for_household(&item.household_id).await?;
        Ok(ItemView::annotate(item, &allergens))
    }
}

#[async_trait]
impl<I, A, L, C, M> InventoryCommand for InventoryService<I, A, L, C, M>
where
    I: InventoryRepository,
    A: AllergenRepository,
    L: LocationRepository,
    C: CategoryRepository,
    M: MembershipRepository,
{
    async fn create(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        draft: ItemDraft,
    ) -> Result<ItemView, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::MutateItems)
            .await?;
        self.check_location(household_id, draft.location_id.as_ref())
            .await?;
        self.check_category(draft.category_id).await?;

        let item = InventoryItem::create(*household_id, actor.clone(), draft);
        self.items.create(&item).await?;
        info!(household_id = %household_id, item_id = %item.id, "item added");
        self.annotate(item).await
    }

    async fn update(
        &self,
        actor: &UserId,
        item_id: &InventoryItemId,
        changes: ItemChanges,
    ) -> Result<ItemView, Error> {
        let mut item = self.load(item_id).await?;
        self.guard
            .require(&item.household_id, actor, HouseholdAction::MutateItems)
            .await?;
        if let Some(location_id) = &changes.location_id {
            self.check_location(&item.household_id, location_id.as_ref())
                .await?;
        }
        if let Some(category_id) = changes.category_id {
            self.check_category(category_id).await?;
        }

        item.apply(changes);
        if !self.items.update(&item).await? {
            return Err(Error::not_found(format!("item {item_id} not found")));
        }
        debug!(item_id = %item_id, "item updated");
        self.annotate(item).await
    }

    async fn delete(&self, actor: &UserId, item_id: &InventoryItemId) -> Result<(), Error> {
        let item = self.load(item_id).await?;
        self.guard
            .require(&item.household_id, actor, HouseholdAction::MutateItems)
            .await?;
        if !self.items.delete(item_id).await? {
            return Err(Error::not_found(format!("item {item_id} not found")));
        }
        info!(household_id = %item.household_id, item_id = %item_id, "item deleted");
        Ok(())
    }
}

#[async_trait]
impl<I, A, L, C, M> InventoryQuery for InventoryService<I, A, L, C, M>
where
    I: InventoryRepository,
    A: AllergenRepository,
    L: LocationRepository,
    C: CategoryRepository,
    M: MembershipRepository,
{
    async fn list(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        query: ItemQuery,
    ) -> Result<Page<ItemView>, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ViewItems)
            .await?;
        let page = self.items.list(household_id, &query).await?;
        let allergens = self.allergens.list_for_household(household_id).await?;
        Ok(page.map(|item| ItemView::annotate(item, &allergens)))
    }

    async fn get(&self, actor: &UserId, item_id: &InventoryItemId) -> Result<ItemView, Error> {
        let item = self.load(item_id).await?;
        self.guard
            .require(&item.household_id, actor, HouseholdAction::ViewItems)
            .await?;
        self.annotate(item).await
    }
}

#[cfg(test)]
#[path = "inventory_service_tests.rs"]
mod tests;
