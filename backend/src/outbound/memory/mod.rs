//! In-process storage implementing every repository port.
//!
//! [`InMemoryStore`] keeps all tables behind one mutex, so each port call
//! observes and mutates a consistent snapshot. It mirrors the relational
//! rules of the PostgreSQL schema: unique names per household, one
//! membership per (household, user), cascading household deletes and
//! location deletes that detach items.
//!
//! The store backs development runs without `PANTRIE_DATABASE_URL` and the
//! end-to-end tests. Data lives only as long as the process.

mod household_data;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    DEVELOPMENT_DISPLAY_NAME, DEVELOPMENT_USER_EMAIL, DEVELOPMENT_USER_ID, HouseholdListing,
    HouseholdRepository, HouseholdRepositoryError, MembershipRepository,
    MembershipRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Allergen, AllergenId, Category, Household, HouseholdId, HouseholdRole, InventoryItem,
    InventoryItemId, Location, LocationId, Member, Membership, MembershipId, StoredRole, User,
    UserId, default_categories, Email,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    households: HashMap<HouseholdId, Household>,
    memberships: HashMap<MembershipId, Membership>,
    allergens: HashMap<AllergenId, Allergen>,
    categories: Vec<Category>,
    locations: HashMap<LocationId, Location>,
    items: HashMap<InventoryItemId, InventoryItem>,
}

impl Tables {
    fn memberships_of(&self, household_id: HouseholdId) -> impl Iterator<Item = &Membership> {
        self.memberships
            .values()
            .filter(move |membership| membership.household_id == household_id)
    }

    fn member_count(&self, household_id: HouseholdId) -> u64 {
        u64::try_from(self.memberships_of(household_id).count()).unwrap_or(u64::MAX)
    }

    fn cascade_household(&mut self, household_id: HouseholdId) {
        self.memberships
            .retain(|_, membership| membership.household_id != household_id);
        self.allergens
            .retain(|_, allergen| allergen.household_id != household_id);
        self.locations
            .retain(|_, location| location.household_id != household_id);
        self.items.retain(|_, item| item.household_id != household_id);
    }
}

/// Thread-safe in-memory implementation of every repository port.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Store seeded with the default categories and the development account.
    #[must_use]
    pub fn new() -> Self {
        let tables = Tables {
            categories: default_categories(),
            ..Tables::default()
        };
        let store = Self {
            tables: Mutex::new(tables),
        };
        match User::try_from_strings(
            DEVELOPMENT_USER_ID,
            DEVELOPMENT_USER_EMAIL,
            DEVELOPMENT_DISPLAY_NAME,
        ) {
            Ok(user) => store.insert_user(user),
            Err(error) => warn!(%error, "development account failed validation; not seeded"),
        }
        store
    }

    /// Register `user`, replacing any account with the same id.
    ///
    /// Account management is outside the HTTP surface; this exists so
    /// development setups and tests can add people to invite.
    pub fn insert_user(&self, user: User) {
        match self.tables.lock() {
            Ok(mut tables) => {
                tables.users.insert(user.id().clone(), user);
            }
            Err(_) => warn!("{POISONED}; user not inserted"),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, &'static str> {
        self.tables.lock().map_err(|_| POISONED)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.lock().map_err(UserRepositoryError::query)?;
        Ok(tables.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.lock().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl HouseholdRepository for InMemoryStore {
    async fn create(
        &self,
        household: &Household,
        founder: &Membership,
    ) -> Result<(), HouseholdRepositoryError> {
        let mut tables = self.lock().map_err(HouseholdRepositoryError::query)?;
        if tables.households.contains_key(&household.id) {
            return Err(HouseholdRepositoryError::query("household id already exists"));
        }
        tables.households.insert(household.id, household.clone());
        tables.memberships.insert(founder.id, founder.clone());
        Ok(())
    }

    async fn find(&self, id: &HouseholdId) -> Result<Option<Household>, HouseholdRepositoryError> {
        let tables = self.lock().map_err(HouseholdRepositoryError::query)?;
        Ok(tables.households.get(id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<HouseholdListing>, HouseholdRepositoryError> {
        let tables = self.lock().map_err(HouseholdRepositoryError::query)?;
        let mut listings: Vec<HouseholdListing> = tables
            .memberships
            .values()
            .filter(|membership| &membership.user_id == user_id)
            .filter_map(|membership| {
                let household = tables.households.get(&membership.household_id)?;
                Some(HouseholdListing {
                    household: household.clone(),
                    role: StoredRole::from(membership.role),
                    member_count: tables.member_count(household.id),
                })
            })
            .collect();
        listings.sort_by(|a, b| {
            a.household
                .name
                .as_ref()
                .cmp(b.household.name.as_ref())
                .then_with(|| a.household.id.cmp(&b.household.id))
        });
        Ok(listings)
    }

    async fn member_count(&self, id: &HouseholdId) -> Result<u64, HouseholdRepositoryError> {
        let tables = self.lock().map_err(HouseholdRepositoryError::query)?;
        Ok(tables.member_count(*id))
    }

    async fn update(&self, household: &Household) -> Result<bool, HouseholdRepositoryError> {
        let mut tables = self.lock().map_err(HouseholdRepositoryError::query)?;
        Ok(tables
            .households
            .get_mut(&household.id)
            .map(|stored| *stored = household.clone())
            .is_some())
    }

    async fn delete(&self, id: &HouseholdId) -> Result<bool, HouseholdRepositoryError> {
        let mut tables = self.lock().map_err(HouseholdRepositoryError::query)?;
        let removed = tables.households.remove(id).is_some();
        if removed {
            tables.cascade_household(*id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn find_role(
        &self,
        household_id: &HouseholdId,
        user_id: &UserId,
    ) -> Result<Option<StoredRole>, MembershipRepositoryError> {
        let tables = self.lock().map_err(MembershipRepositoryError::query)?;
        Ok(tables
            .memberships_of(*household_id)
            .find(|membership| &membership.user_id == user_id)
            .map(|membership| StoredRole::from(membership.role)))
    }

    async fn find(
        &self,
        id: &MembershipId,
    ) -> Result<Option<Membership>, MembershipRepositoryError> {
        let tables = self.lock().map_err(MembershipRepositoryError::query)?;
        Ok(tables.memberships.get(id).cloned())
    }

    async fn list_members(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Member>, MembershipRepositoryError> {
        let tables = self.lock().map_err(MembershipRepositoryError::query)?;
        let mut members = tables
            .memberships_of(*household_id)
            .map(|membership| {
                let user = tables.users.get(&membership.user_id).ok_or_else(|| {
                    MembershipRepositoryError::query(format!(
                        "membership {} references unknown user",
                        membership.id
                    ))
                })?;
                Ok(Member {
                    membership: membership.clone(),
                    email: user.email().clone(),
                    display_name: user.display_name().clone(),
                })
            })
            .collect::<Result<Vec<_>, MembershipRepositoryError>>()?;
        members.sort_by(|a, b| {
            a.membership
                .joined_at
                .cmp(&b.membership.joined_at)
                .then_with(|| a.membership.id.cmp(&b.membership.id))
        });
        Ok(members)
    }

    async fn add(&self, membership: &Membership) -> Result<(), MembershipRepositoryError> {
        let mut tables = self.lock().map_err(MembershipRepositoryError::query)?;
        let exists = tables
            .memberships_of(membership.household_id)
            .any(|existing| existing.user_id == membership.user_id);
        if exists {
            return Err(MembershipRepositoryError::duplicate(format!(
                "user {} in household {}",
                membership.user_id, membership.household_id
            )));
        }
        tables.memberships.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update_role(
        &self,
        id: &MembershipId,
        role: HouseholdRole,
    ) -> Result<bool, MembershipRepositoryError> {
        let mut tables = self.lock().map_err(MembershipRepositoryError::query)?;
        Ok(tables
            .memberships
            .get_mut(id)
            .map(|membership| membership.role = role)
            .is_some())
    }

    async fn remove(&self, id: &MembershipId) -> Result<bool, MembershipRepositoryError> {
        let mut tables = self.lock().map_err(MembershipRepositoryError::query)?;
        Ok(tables.memberships.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests;
