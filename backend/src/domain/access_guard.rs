//! Membership-aware authorisation used by every household service.
//!
//! The guard resolves the actor's stored role for one household and checks it
//! against the capability table. Three failures stay distinguishable through
//! the `code` in the error details:
//!
//! - `not_a_member`: the actor has no membership in the household.
//! - `role_denied`: the actor's role does not allow the action.
//! - `unknown_role`: the stored role is corrupt; a warning is logged.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::ports::MembershipRepository;
use crate::domain::{
    authorize_stored_role, Error, HouseholdAction, HouseholdId, HouseholdRole, UserId,
};

/// Authorises actors against their household membership.
pub struct AccessGuard<M> {
    memberships: Arc<M>,
}

impl<M> Clone for AccessGuard<M> {
    fn clone(&self) -> Self {
        Self {
            memberships: Arc::clone(&self.memberships),
        }
    }
}

impl<M> AccessGuard<M> {
    /// Create a guard reading memberships from `memberships`.
    pub const fn new(memberships: Arc<M>) -> Self {
        Self { memberships }
    }
}

impl<M> AccessGuard<M>
where
    M: MembershipRepository,
{
    /// Ensure `actor` may perform `action` in `household_id`.
    ///
    /// Returns the actor's role on success.
    pub async fn require(
        &self,
        household_id: &HouseholdId,
        actor: &UserId,
        action: HouseholdAction,
    ) -> Result<HouseholdRole, Error> {
        let Some(stored) = self.memberships.find_role(household_id, actor).await? else {
            return Err(Error::forbidden("you are not a member of this household").with_details(
                json!({ "code": "not_a_member", "householdId": household_id }),
            ));
        };

        let decision = authorize_stored_role(&stored, action).map_err(|unknown| {
            warn!(
                household_id = %household_id,
                user_id = %actor,
                stored_role = unknown.raw(),
                action = action.as_str(),
                "membership has an unknown role; denying",
            );
            Error::forbidden("your membership role is not recognised").with_details(json!({
                "code": "unknown_role",
                "action": action.as_str(),
            }))
        })?;

        if !decision.is_permitted() {
            return Err(
                Error::forbidden(format!("your role does not allow {action}")).with_details(
                    json!({
                        "code": "role_denied",
                        "role": stored.as_str(),
                        "action": action.as_str(),
                    }),
                ),
            );
        }

        stored
            .parse()
            .map_err(|err| Error::internal(format!("role changed during check: {err}")))
    }
}

#[cfg(test)]
mod tests {
    //! Outcome coverage for the access guard.
    use super::*;
    use crate::domain::ports::{MembershipRepositoryError, MockMembershipRepository};
    use crate::domain::{ErrorCode, StoredRole};
    use rstest::rstest;

    fn guard_with(
        role: Result<Option<StoredRole>, MembershipRepositoryError>,
    ) -> AccessGuard<MockMembershipRepository> {
        let mut repo = MockMembershipRepository::new();
        repo.expect_find_role()
            .times(1)
            .return_once(move |_, _| role);
        AccessGuard::new(Arc::new(repo))
    }

    fn detail_code(error: &Error) -> Option<&str> {
        error.details().and_then(|d| d["code"].as_str())
    }

    #[rstest]
    #[tokio::test]
    async fn non_members_are_refused_before_the_table() {
        let guard = guard_with(Ok(None));
        let err = guard
            .require(&HouseholdId::random(), &UserId::random(), HouseholdAction::ViewItems)
            .await
            .expect_err("non-members are refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(detail_code(&err), Some("not_a_member"));
    }

    #[rstest]
    #[case("viewer", HouseholdAction::MutateItems)]
    #[case("editor", HouseholdAction::ManageSettings)]
    #[case("editor", HouseholdAction::ManageMembers)]
    #[tokio::test]
    async fn table_denials_are_reported_as_role_denied(
        #[case] role: &str,
        #[case] action: HouseholdAction,
    ) {
        let guard = guard_with(Ok(Some(StoredRole::new(role))));
        let err = guard
            .require(&HouseholdId::random(), &UserId::random(), action)
            .await
            .expect_err("denied");
        assert_eq!(detail_code(&err), Some("role_denied"));
    }

    #[rstest]
    #[case("viewer", HouseholdAction::ViewItems, HouseholdRole::Viewer)]
    #[case("editor", HouseholdAction::MutateItems, HouseholdRole::Editor)]
    #[case("admin", HouseholdAction::ManageMembers, HouseholdRole::Admin)]
    #[tokio::test]
    async fn permitted_actions_return_the_role(
        #[case] role: &str,
        #[case] action: HouseholdAction,
        #[case] expected: HouseholdRole,
    ) {
        let guard = guard_with(Ok(Some(StoredRole::new(role))));
        let granted = guard
            .require(&HouseholdId::random(), &UserId::random(), action)
            .await
            .expect("permitted");
        assert_eq!(granted, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn corrupt_roles_never_permit() {
        let guard = guard_with(Ok(Some(StoredRole::new("superuser"))));
        let err = guard
            .require(&HouseholdId::random(), &UserId::random(), HouseholdAction::ViewItems)
            .await
            .expect_err("unknown roles deny");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(detail_code(&err), Some("unknown_role"));
    }

    #[rstest]
    #[tokio::test]
    async fn storage_outages_surface_as_service_unavailable() {
        let guard = guard_with(Err(MembershipRepositoryError::connection("refused")));
        let err = guard
            .require(&HouseholdId::random(), &UserId::random(), HouseholdAction::ViewItems)
            .await
            .expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
