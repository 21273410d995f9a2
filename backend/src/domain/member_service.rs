//! Household membership use-cases.
//!
//! Admins manage everyone except themselves: an admin cannot change their own
//! role or remove themselves, which keeps a household from being left without
//! an administrator by accident.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{MemberCommand, MemberQuery, MembershipRepository, UserRepository};
use crate::domain::{
    AccessGuard, Email, Error, HouseholdAction, HouseholdId, HouseholdRole, Member, Membership,
    MembershipId, UserId,
};

/// Membership service implementing the member driving ports.
pub struct MemberService<M, U> {
    memberships: Arc<M>,
    users: Arc<U>,
    guard: AccessGuard<M>,
}

impl<M, U> MemberService<M, U> {
    /// Create a new service with the given repositories.
    pub fn new(memberships: Arc<M>, users: Arc<U>) -> Self {
        Self {
            guard: AccessGuard::new(Arc::clone(&memberships)),
            memberships,
            users,
        }
    }
}

impl<M, U> MemberService<M, U>
where
    M: MembershipRepository,
    U: UserRepository,
{
    /// Load a membership and check it belongs to `household_id`.
    async fn load(
        &self,
        household_id: &HouseholdId,
        membership_id: &MembershipId,
    ) -> Result<Membership, Error> {
        self.memberships
            .find(membership_id)
            .await?
            .filter(|membership| membership.household_id == *household_id)
            .ok_or_else(|| Error::not_found(format!("member {membership_id} not found")))
    }

    async fn member(
        &self,
        household_id: &HouseholdId,
        membership_id: &MembershipId,
    ) -> Result<Member, Error> {
        self.memberships
            .list_members(household_id)
            .await?
            .into_iter()
            .find(|member| member.membership.id == *membership_id)
            .ok_or_else(|| Error::not_found(format!("member {membership_id} not found")))
    }

    fn refuse_self(actor: &UserId, membership: &Membership, what: &str) -> Result<(), Error> {
        if membership.user_id == *actor {
            return Err(
                Error::forbidden(format!("you cannot {what} yourself")).with_details(json!({
                    "code": "self_management",
                })),
            );
        }
        Ok(())
    }
}

#[async_trait]
impl<M, U> MemberCommand for MemberService<M, U>
where
    M: MembershipRepository,
    U: UserRepository,
{
    async fn add(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        email: Email,
        role: HouseholdRole,
    ) -> Result<Member, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ManageMembers)
            .await?;
        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            Error::not_found(format!("no registered user with email {email}"))
                .with_details(json!({ "field": "email", "code": "unknown_user" }))
        })?;

        let membership = Membership::join(*household_id, user.id().clone(), role);
        self.memberships.add(&membership).await?;
        info!(
            household_id = %household_id,
            user_id = %user.id(),
            role = %role,
            "member added",
        );
        Ok(Member {
            membership,
            email: user.email().clone(),
            display_name: user.display_name().clone(),
        })
    }

    async fn change_role(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        membership_id: &MembershipId,
        role: HouseholdRole,
    ) -> Result<Member, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ManageMembers)
            .await?;
        let membership = self.load(household_id, membership_id).await?;
        Self::refuse_self(actor, &membership, "change the role of")?;
        if !self.memberships.update_role(membership_id, role).await? {
            return Err(Error::not_found(format!("member {membership_id} not found")));
        }
        self.member(household_id, membership_id).await
    }

    async fn remove(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
        membership_id: &MembershipId,
    ) -> Result<(), Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ManageMembers)
            .await?;
        let membership = self.load(household_id, membership_id).await?;
        Self::refuse_self(actor, &membership, "remove")?;
        if !self.memberships.remove(membership_id).await? {
            return Err(Error::not_found(format!("member {membership_id} not found")));
        }
        info!(household_id = %household_id, membership_id = %membership_id, "member removed");
        Ok(())
    }
}

#[async_trait]
impl<M, U> MemberQuery for MemberService<M, U>
where
    M: MembershipRepository,
    U: UserRepository,
{
    async fn list(
        &self,
        actor: &UserId,
        household_id: &HouseholdId,
    ) -> Result<Vec<Member>, Error> {
        self.guard
            .require(household_id, actor, HouseholdAction::ViewItems)
            .await?;
        Ok(self.memberships.list_members(household_id).await?)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the membership service.
    use super::*;
    use crate::domain::ports::{
        MembershipRepositoryError, MockMembershipRepository, MockUserRepository,
    };
    use crate::domain::{DisplayName, ErrorCode, StoredRole, User};
    use rstest::rstest;

    fn admin_repo() -> MockMembershipRepository {
        let mut memberships = MockMembershipRepository::new();
        memberships
            .expect_find_role()
            .returning(|_, _| Ok(Some(StoredRole::new("admin"))));
        memberships
    }

    fn user(email: &str) -> User {
        User::new(
            UserId::random(),
            Email::new(email).expect("email"),
            DisplayName::new("Grace").expect("name"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn add_resolves_the_user_by_email() {
        let invited = user("grace@example.com");
        let invited_id = invited.id().clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .return_once(move |_| Ok(Some(invited)));
        let mut memberships = admin_repo();
        memberships
            .expect_add()
            .withf(move |m| m.user_id == invited_id && m.role == HouseholdRole::Viewer)
            .return_once(|_| Ok(()));

        let service = MemberService::new(Arc::new(memberships), Arc::new(users));
        let member = service
            .add(
                &UserId::random(),
                &HouseholdId::random(),
                Email::new("Grace@Example.com").expect("email"),
                HouseholdRole::Viewer,
            )
            .await
            .expect("added");
        assert_eq!(member.display_name.as_ref(), "Grace");
    }

    #[rstest]
    #[tokio::test]
    async fn add_unknown_email_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().return_once(|_| Ok(None));

        let service = MemberService::new(Arc::new(admin_repo()), Arc::new(users));
        let err = service
            .add(
                &UserId::random(),
                &HouseholdId::random(),
                Email::new("nobody@example.com").expect("email"),
                HouseholdRole::Editor,
            )
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn add_existing_member_is_a_conflict() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .return_once(|_| Ok(Some(user("grace@example.com"))));
        let mut memberships = admin_repo();
        memberships
            .expect_add()
            .return_once(|_| Err(MembershipRepositoryError::duplicate("grace")));

        let service = MemberService::new(Arc::new(memberships), Arc::new(users));
        let err = service
            .add(
                &UserId::random(),
                &HouseholdId::random(),
                Email::new("grace@example.com").expect("email"),
                HouseholdRole::Editor,
            )
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn admins_cannot_demote_themselves() {
        let actor = UserId::random();
        let household = HouseholdId::random();
        let own = Membership::join(household, actor.clone(), HouseholdRole::Admin);
        let own_id = own.id;
        let mut memberships = admin_repo();
        memberships.expect_find().return_once(move |_| Ok(Some(own)));
        memberships.expect_update_role().never();

        let service =
            MemberService::new(Arc::new(memberships), Arc::new(MockUserRepository::new()));
        let err = service
            .change_role(&actor, &household, &own_id, HouseholdRole::Viewer)
            .await
            .expect_err("self change refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn memberships_from_other_households_are_not_found() {
        let foreign = Membership::join(HouseholdId::random(), UserId::random(), HouseholdRole::Viewer);
        let foreign_id = foreign.id;
        let mut memberships = admin_repo();
        memberships
            .expect_find()
            .return_once(move |_| Ok(Some(foreign)));
        memberships.expect_remove().never();

        let service =
            MemberService::new(Arc::new(memberships), Arc::new(MockUserRepository::new()));
        let err = service
            .remove(&UserId::random(), &HouseholdId::random(), &foreign_id)
            .await
            .expect_err("wrong household");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn editors_cannot_manage_members() {
        let mut memberships = MockMembershipRepository::new();
        memberships
            .expect_find_role()
            .return_once(|_, _| Ok(Some(StoredRole::new("editor"))));
        memberships.expect_remove().never();

        let service =
            MemberService::new(Arc::new(memberships), Arc::new(MockUserRepository::new()));
        let err = service
            .remove(&UserId::random(), &HouseholdId::random(), &MembershipId::random())
            .await
            .expect_err("denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
