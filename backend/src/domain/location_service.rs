//! Storage location use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    LocationCommand, LocationQuery, LocationRepository, MembershipRepository,
};
use crate::domain::{
    AccessGuard, Error, HouseholdAction, HouseholdId, Location, LocationChanges, LocationDraft,
    LocationId, UserId,
};

/// Location service implementing the location driving ports.
pub struct LocationService<L, M> {
    locations: Arc<L>,
    guard: AccessGuard<M>,
}

impl<L, M> LocationService<L, M> {
    /// Create a new service with the given repositories.
    pub const fn new(locations: Arc<L>, memberships: Arc<M>) -> Self {
        Self {
            locations,
            guard: AccessGuard::new(memberships),
        }
    }
}

impl<L, M> LocationService<L, M>
where
    L: LocationRepository,
    M: MembershipRepository,
{
    /// Load a location and authorise `action` against its household.
    async fn authorised(
        &self,
        actor: &UserId,
        location_id: &LocationId,
        action: HouseholdAction,
    ) -> Result<Location, Error> {
        let location = self
            .locations
            .find(location_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("location {location_id} not found")))?;
        self.guard
            .require(&location.household_id, actor, action)
            .await?;
        Ok(location)
    }
}

#[async_trait]
impl<L, M> LocationCommand for LocationService<L, M>
where
    L: LocationRepository,
    M: MembershipRepository,
{
    async fn create(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        draft: LocationDraft,
    ) -> Result<Location, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::MutateItems)
            .await?;
        let location = Location::create(*household_id, draft);
        self.locations.create(&location).await?;
        info!(household_id = %household_id, location_id = %location.id, "location created");
        Ok(location)
    }

    async fn update(
        &self,
        actor: &UserId,
        location_id: &LocationId,
        changes: LocationChanges,
    ) -> Result<Location, Error> {
        let mut location = self
            .authorised(actor, location_id, HouseholdAction::MutateItems)
            .await?;
        location.apply(changes);
        if !self.locations.update(&location).await? {
            return Err(Error::not_found(format!("location {location_id} not found")));
        }
        Ok(location)
    }

    async fn delete(&self, actor: &UserId, location_id: &LocationId) -> Result<(), Error> {
        self.authorised(actor, location_id, HouseholdAction::MutateItems)
            .await?;
        if !self.locations.delete(location_id).await? {
            return Err(Error::not_found(format!("location {location_id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl<L, M> LocationQuery for LocationService<L, M>
where
    L: LocationRepository,
    M: MembershipRepository,
{
    async fn list(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
    ) -> Result<Vec<Location>, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ViewItems)
            .await?;
        Ok(self.locations.list_for_household(household_id).await?)
    }

    async fn get(&self, actor: &UserId, location_id: &LocationId) -> Result<Location, Error> {
        self.authorised(actor, location_id, HouseholdAction::ViewItems)
            .await
    }
}
