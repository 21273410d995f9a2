//! Allergen list use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AllergenCommand, AllergenQuery, AllergenRepository, MembershipRepository,
};
use crate::domain::{
    AccessGuard, Allergen, AllergenId, AllergenName, Error, HouseholdAction, HouseholdId, UserId,
};

/// Allergen service implementing the allergen driving ports.
pub struct AllergenService<A, M> {
    allergens: Arc<A>,
    guard: AccessGuard<M>,
}

impl<A, M> AllergenService<A, M> {
    /// Create a new service with the given repositories.
    pub const fn new(allergens: Arc<A>, memberships: Arc<M>) -> Self {
        Self {
            allergens,
            guard: AccessGuard::new(memberships),
        }
    }
}

#[async_trait]
impl<A, M> AllergenCommand for AllergenService<A, M>
where
    A: AllergenRepository,
    M: MembershipRepository,
{
    async fn create(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        name: AllergenName,
    ) -> Result<Allergen, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ManageSettings)
            .await?;
        let allergen = Allergen::new(*household_id, name);
        self.allergens.create(&allergen).await?;
        info!(household_id = %household_id, allergen = %allergen.name, "allergen tracked");
        Ok(allergen)
    }

    async fn delete(&self, actor: &UserId, allergen_id: &AllergenId) -> Result<(), Error> {
        let allergen = self
            .allergens
            .find(allergen_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("allergen {allergen_id} not found")))?;
        self.guard
            .require(&allergen.household_id, actor, HouseholdAction::ManageSettings)
            .await?;
        if !self.allergens.delete(allergen_id).await? {
            return Err(Error::not_found(format!("allergen {allergen_id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl<A, M> AllergenQuery for AllergenService<A, M>
where
    A: AllergenRepository,
    M: MembershipRepository,
{
    async fn list(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
    ) -> Result<Vec<Allergen>, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ViewItems)
            .await?;
        Ok(self.allergens.list_for_household(household_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        AllergenRepositoryError, MockAllergenRepository, MockMembershipRepository,
    };
    use crate::domain::{ErrorCode, StoredRole};
    use rstest::rstest;

    fn member_as(role: &'static str) -> MockMembershipRepository {
        let mut memberships = MockMembershipRepository::new();
        memberships
            .expect_find_role()
            .return_once(move |_, _| Ok(Some(StoredRole::new(role))));
        memberships
    }

    fn peanut() -> AllergenName {
        AllergenName::new("Peanut").expect("valid allergen")
    }

    #[rstest]
    #[tokio::test]
    async fn admins_track_new_terms() {
        let mut allergens = MockAllergenRepository::new();
        allergens
            .expect_create()
            .times(1)
            .withf(|a| a.name.as_ref() == "peanut")
            .return_once(|_| Ok(()));

        let service = AllergenService::new(Arc::new(allergens), Arc::new(member_as("admin")));
        let created = service
            .create(&UserId::random(), &HouseholdId::random(), peanut())
            .await
            .expect("created");
        assert_eq!(created.name.as_ref(), "peanut");
    }

    #[rstest]
    #[case("viewer")]
    #[case("editor")]
    #[tokio::test]
    async fn non_admins_cannot_change_the_list(#[case] role: &'static str) {
        let mut allergens = MockAllergenRepository::new();
        allergens.expect_create().never();

        let service = AllergenService::new(Arc::new(allergens), Arc::new(member_as(role)));
        let err = service
            .create(&UserId::random(), &HouseholdId::random(), peanut())
            .await
            .expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_terms_conflict() {
        let mut allergens = MockAllergenRepository::new();
        allergens
            .expect_create()
            .return_once(|_| Err(AllergenRepositoryError::duplicate("peanut")));

        let service = AllergenService::new(Arc::new(allergens), Arc::new(member_as("admin")));
        let err = service
            .create(&UserId::random(), &HouseholdId::random(), peanut())
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_an_unknown_allergen_is_not_found() {
        let mut allergens = MockAllergenRepository::new();
        allergens.expect_find().return_once(|_| Ok(None));

        let service = AllergenService::new(
            Arc::new(allergens),
            Arc::new(MockMembershipRepository::new()),
        );
        let err = service
            .delete(&UserId::random(), &AllergenId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn viewers_may_list() {
        let household = HouseholdId::random();
        let mut allergens = MockAllergenRepository::new();
        allergens
            .expect_list_for_household()
            .return_once(move |_| Ok(vec![Allergen::new(household, peanut())]));

        let service = AllergenService::new(Arc::new(allergens), Arc::new(member_as("viewer")));
        let listed = service
            .list(&UserId::random(), &household)
            .await
            .expect("listed");
        assert_eq!(listed.len(), 1);
    }
}
