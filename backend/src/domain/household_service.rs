//! Household use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    HouseholdCommand, HouseholdListing, HouseholdQuery, HouseholdRepository, MembershipRepository,
};
use crate::domain::{
    AccessGuard, Error, Household, HouseholdAction, HouseholdChanges, HouseholdDraft, HouseholdId,
    HouseholdOverview, HouseholdRole, Membership, UserId,
};

/// Household service implementing the household driving ports.
pub struct HouseholdService<H, M> {
    households: Arc<H>,
    guard: AccessGuard<M>,
}

impl<H, M> HouseholdService<H, M> {
    /// Create a new service with the given repositories.
    pub const fn new(households: Arc<H>, memberships: Arc<M>) -> Self {
        Self {
            households,
            guard: AccessGuard::new(memberships),
        }
    }
}

impl<H, M> HouseholdService<H, M>
where
    H: HouseholdRepository,
    M: MembershipRepository,
{
    async fn load(&self, household_id: &HouseholdId) -> Result<Household, Error> {
        self.households
            .find(household_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("household {household_id} not found")))
    }

    fn overview(listing: HouseholdListing) -> Option<HouseholdOverview> {
        match listing.role.parse() {
            Ok(role) => Some(HouseholdOverview {
                household: listing.household,
                role,
                member_count: listing.member_count,
            }),
            Err(err) => {
                warn!(
                    household_id = %listing.household.id,
                    stored_role = err.raw(),
                    "skipping household with unknown membership role",
                );
                None
            }
        }
    }
}

#[async_trait]
impl<H, M> HouseholdCommand for HouseholdService<H, M>
where
    H: HouseholdRepository,
    M: MembershipRepository,
{
    async fn create(
        &self,
        actor: &UserId,
        draft: HouseholdDraft,
    ) -> Result<HouseholdOverview, Error> {
        let household = Household::create(draft);
        let founder = Membership::join(household.id, actor.clone(), HouseholdRole::Admin);
        self.households.create(&household, &founder).await?;
        info!(household_id = %household.id, user_id = %actor, "household created");
        Ok(HouseholdOverview {
            household,
            role: HouseholdRole::Admin,
            member_count: 1,
        })
    }

    async fn update(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        changes: HouseholdChanges,
    ) -> Result<Household, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ManageSettings)
            .await?;
        let mut household = self.load(household_id).await?;
        household.apply(changes);
        if !self.households.update(&household).await? {
            return Err(Error::not_found(format!("household {household_id} not found")));
        }
        Ok(household)
    }

    async fn delete(&self, actor: &UserId, household_id: &HouseholdId) -> Result<(), Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ManageSettings)
            .await?;
        if !self.households.delete(household_id).await? {
            return Err(Error::not_found(format!("household {household_id} not found")));
        }
        info!(household_id = %household_id, user_id = %actor, "household deleted");
        Ok(())
    }
}

#[async_trait]
impl<H, M> HouseholdQuery for HouseholdService<H, M>
where
    H: HouseholdRepository,
    M: MembershipRepository,
{
    async fn list(&self, actor: &UserId) -> Result<Vec<HouseholdOverview>, Error> {
        let listings = self.households.list_for_user(actor).await?;
        Ok(listings.into_iter().filter_map(Self::overview).collect())
    }

    async fn get(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
    ) -> Result<HouseholdOverview, Error> {
        let role = self
            .guard
            .require(household_id, actor, HouseholdAction::ViewItems)
            .await?;
        let household = self.load(household_id).await?;
        let member_count = self.households.member_count(household_id).await?;
        Ok(HouseholdOverview {
            household,
            role,
            member_count,
        })
    }
}

#[cfg(test)]
#[path = "household_service_tests.rs"]
mod tests;
