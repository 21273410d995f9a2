//! PostgreSQL-backed `MembershipRepository` implementation.
//!
//! Roles are read back verbatim for [`MembershipRepository::find_role`]; the
//! access guard decides what an unexpected value means.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MembershipRepository, MembershipRepositoryError};
use crate::domain::{
    DisplayName, Email, HouseholdId, HouseholdRole, Member, Membership, MembershipId, StoredRole,
    UserId,
};

use super::error_mapping::{
    convert_row, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{MembershipRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{household_memberships, users};

/// Diesel-backed membership storage.
#[derive(Clone)]
pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MembershipRepositoryError {
    map_basic_pool_error(error, MembershipRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MembershipRepositoryError {
    map_basic_diesel_error(
        &error,
        MembershipRepositoryError::query,
        MembershipRepositoryError::connection,
    )
}

fn member_from_rows(
    membership: MembershipRow,
    user: UserRow,
) -> Result<Member, MembershipRepositoryError> {
    let membership: Membership = convert_row(membership, MembershipRepositoryError::query)?;
    let email = Email::new(&user.email)
        .map_err(|err| MembershipRepositoryError::query(format!("user {}: {err}", user.id)))?;
    let display_name = DisplayName::new(&user.display_name)
        .map_err(|err| MembershipRepositoryError::query(format!("user {}: {err}", user.id)))?;
    Ok(Member {
        membership,
        email,
        display_name,
    })
}

#[async_trait]
impl MembershipRepository for DieselMembershipRepository {
    async fn find_role(
        &self,
        household_id: &HouseholdId,
        user_id: &UserId,
    ) -> Result<Option<StoredRole>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let role: Option<String> = household_memberships::table
            .filter(household_memberships::household_id.eq(household_id.as_uuid()))
            .filter(household_memberships::user_id.eq(user_id.as_uuid()))
            .select(household_memberships::role)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(role.map(StoredRole::new))
    }

    async fn find(
        &self,
        id: &MembershipId,
    ) -> Result<Option<Membership>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MembershipRow> = household_memberships::table
            .filter(household_memberships::id.eq(id.as_uuid()))
            .select(MembershipRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| convert_row(row, MembershipRepositoryError::query))
            .transpose()
    }

    async fn list_members(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Member>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(MembershipRow, UserRow)> = household_memberships::table
            .inner_join(users::table)
            .filter(household_memberships::household_id.eq(household_id.as_uuid()))
            .select((MembershipRow::as_select(), UserRow::as_select()))
            .order_by((
                household_memberships::joined_at.asc(),
                household_memberships::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(membership, user)| member_from_rows(membership, user))
            .collect()
    }

    async fn add(&self, membership: &Membership) -> Result<(), MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(household_memberships::table)
            .values(MembershipRow::from(membership))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    MembershipRepositoryError::duplicate(format!(
                        "user {} in household {}",
                        membership.user_id, membership.household_id
                    ))
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn update_role(
        &self,
        id: &MembershipId,
        role: HouseholdRole,
    ) -> Result<bool, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = household_memberships::table.filter(household_memberships::id.eq(id.as_uuid()));
        let updated = diesel::update(target)
            .set(household_memberships::role.eq(role.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn remove(&self, id: &MembershipId) -> Result<bool, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = household_memberships::table.filter(household_memberships::id.eq(id.as_uuid()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
