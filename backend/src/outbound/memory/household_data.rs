//! Household-scoped data: allergens, locations, categories and items.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::ports::{
    AllergenRepository, AllergenRepositoryError, CategoryRepository, CategoryRepositoryError,
    InventoryRepository, InventoryRepositoryError, LocationRepository, LocationRepositoryError,
};
use crate::domain::{
    Allergen, AllergenId, Category, CategoryId, HouseholdId, InventoryItem, InventoryItemId,
    ItemQuery, Location, LocationId,
};

use super::{InMemoryStore, Tables};

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

impl Tables {
    fn location_name_taken(&self, location: &Location) -> bool {
        self.locations.values().any(|existing| {
            existing.household_id == location.household_id
                && existing.id != location.id
                && existing.name == location.name
        })
    }
}

#[async_trait]
impl AllergenRepository for InMemoryStore {
    async fn list_for_household(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Allergen>, AllergenRepositoryError> {
        let tables = self.lock().map_err(AllergenRepositoryError::query)?;
        let mut allergens: Vec<Allergen> = tables
            .allergens
            .values()
            .filter(|allergen| &allergen.household_id == household_id)
            .cloned()
            .collect();
        allergens.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(allergens)
    }

    async fn find(&self, id: &AllergenId) -> Result<Option<Allergen>, AllergenRepositoryError> {
        let tables = self.lock().map_err(AllergenRepositoryError::query)?;
        Ok(tables.allergens.get(id).cloned())
    }

    async fn create(&self, allergen: &Allergen) -> Result<(), AllergenRepositoryError> {
        let mut tables = self.lock().map_err(AllergenRepositoryError::query)?;
        let taken = tables.allergens.values().any(|existing| {
            existing.household_id == allergen.household_id && existing.name == allergen.name
        });
        if taken {
            return Err(AllergenRepositoryError::duplicate(allergen.name.as_ref()));
        }
        tables.allergens.insert(allergen.id, allergen.clone());
        Ok(())
    }

    async fn delete(&self, id: &AllergenId) -> Result<bool, AllergenRepositoryError> {
        let mut tables = self.lock().map_err(AllergenRepositoryError::query)?;
        Ok(tables.allergens.remove(id).is_some())
    }
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn list_for_household(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Location>, LocationRepositoryError> {
        let tables = self.lock().map_err(LocationRepositoryError::query)?;
        let mut locations: Vec<Location> = tables
            .locations
            .values()
            .filter(|location| &location.household_id == household_id)
            .cloned()
            .collect();
        locations.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(locations)
    }

    async fn find(&self, id: &LocationId) -> Result<Option<Location>, LocationRepositoryError> {
        let tables = self.lock().map_err(LocationRepositoryError::query)?;
        Ok(tables.locations.get(id).cloned())
    }

    async fn create(&self, location: &Location) -> Result<(), LocationRepositoryError> {
        let mut tables = self.lock().map_err(LocationRepositoryError::query)?;
        if tables.location_name_taken(location) {
            return Err(LocationRepositoryError::duplicate(location.name.as_ref()));
        }
        tables.locations.insert(location.id, location.clone());
        Ok(())
    }

    async fn update(&self, location: &Location) -> Result<bool, LocationRepositoryError> {
        let mut tables = self.lock().map_err(LocationRepositoryError::query)?;
        if !tables.locations.contains_key(&location.id) {
            return Ok(false);
        }
        if tables.location_name_taken(location) {
            return Err(LocationRepositoryError::duplicate(location.name.as_ref()));
        }
        tables.locations.insert(location.id, location.clone());
        Ok(true)
    }

    async fn delete(&self, id: &LocationId) -> Result<bool, LocationRepositoryError> {
        let mut tables = self.lock().map_err(LocationRepositoryError::query)?;
        if tables.locations.remove(id).is_none() {
            return Ok(false);
        }
        for item in tables.items.values_mut() {
            if item.location_id.as_ref() == Some(id) {
                item.location_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let tables = self.lock().map_err(CategoryRepositoryError::query)?;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError> {
        let tables = self.lock().map_err(CategoryRepositoryError::query)?;
        Ok(tables
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }
}

#[async_trait]
impl InventoryRepository for InMemoryStore {
    async fn list(
        &self,
        household_id: &HouseholdId,
        query: &ItemQuery,
    ) -> Result<Page<InventoryItem>, InventoryRepositoryError> {
        let tables = self.lock().map_err(InventoryRepositoryError::query)?;
        let mut matching: Vec<&InventoryItem> = tables
            .items
            .values()
            .filter(|item| &item.household_id == household_id && query.matches(item))
            .collect();
        matching.sort_by(|a, b| query.compare(a, b));
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let items = matching
            .into_iter()
            .skip(to_index(query.page.offset()))
            .take(to_index(query.page.limit()))
            .cloned()
            .collect();
        Ok(Page::new(items, total, query.page))
    }

    async fn find(
        &self,
        id: &InventoryItemId,
    ) -> Result<Option<InventoryItem>, InventoryRepositoryError> {
        let tables = self.lock().map_err(InventoryRepositoryError::query)?;
        Ok(tables.items.get(id).cloned())
    }

    async fn create(&self, item: &InventoryItem) -> Result<(), InventoryRepositoryError> {
        let mut tables = self.lock().map_err(InventoryRepositoryError::query)?;
        if !tables.households.contains_key(&item.household_id) {
            return Err(InventoryRepositoryError::query(format!(
                "household {} does not exist",
                item.household_id
            )));
        }
        tables.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &InventoryItem) -> Result<bool, InventoryRepositoryError> {
        let mut tables = self.lock().map_err(InventoryRepositoryError::query)?;
        Ok(tables
            .items
            .get_mut(&item.id)
            .map(|stored| *stored = item.clone())
            .is_some())
    }

    async fn delete(&self, id: &InventoryItemId) -> Result<bool, InventoryRepositoryError> {
        let mut tables = self.lock().map_err(InventoryRepositoryError::query)?;
        Ok(tables.items.remove(id).is_some())
    }
}
