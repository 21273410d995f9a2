//! PostgreSQL-backed `HouseholdRepository` implementation.
//!
//! A household and its founding membership are written in one transaction.
//! Deleting a household relies on `ON DELETE CASCADE` to remove memberships,
//! allergens, locations and items.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{HouseholdListing, HouseholdRepository, HouseholdRepositoryError};
use crate::domain::{Household, HouseholdId, Membership, StoredRole, UserId};

use super::error_mapping::{convert_row, map_basic_diesel_error, map_basic_pool_error};
use super::models::{HouseholdRow, HouseholdUpdate, MembershipRow};
use super::pool::{DbPool, PoolError};
use super::schema::{household_memberships, households};

/// Diesel-backed household storage.
#[derive(Clone)]
pub struct DieselHouseholdRepository {
    pool: DbPool,
}

impl DieselHouseholdRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HouseholdRepositoryError {
    map_basic_pool_error(error, HouseholdRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HouseholdRepositoryError {
    map_basic_diesel_error(
        &error,
        HouseholdRepositoryError::query,
        HouseholdRepositoryError::connection,
    )
}

fn to_count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or_default()
}

#[async_trait]
impl HouseholdRepository for DieselHouseholdRepository {
    async fn create(
        &self,
        household: &Household,
        founder: &Membership,
    ) -> Result<(), HouseholdRepositoryError> {
        let household_row = HouseholdRow::from(household);
        let membership_row = MembershipRow::from(founder);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(households::table)
                    .values(&household_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(household_memberships::table)
                    .values(&membership_row)
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find(&self, id: &HouseholdId) -> Result<Option<Household>, HouseholdRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<HouseholdRow> = households::table
            .filter(households::id.eq(id.as_uuid()))
            .select(HouseholdRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| convert_row(row, HouseholdRepositoryError::query))
            .transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<HouseholdListing>, HouseholdRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(HouseholdRow, String)> = households::table
            .inner_join(household_memberships::table)
            .filter(household_memberships::user_id.eq(user_id.as_uuid()))
            .select((HouseholdRow::as_select(), household_memberships::role))
            .order_by((households::name.asc(), households::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|(row, _)| row.id).collect();
        let counts: HashMap<Uuid, i64> = household_memberships::table
            .filter(household_memberships::household_id.eq_any(ids))
            .group_by(household_memberships::household_id)
            .select((
                household_memberships::household_id,
                diesel::dsl::count_star(),
            ))
            .load::<(Uuid, i64)>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .collect();

        rows.into_iter()
            .map(|(row, role)| {
                let member_count = to_count(counts.get(&row.id).copied().unwrap_or_default());
                Ok(HouseholdListing {
                    household: convert_row(row, HouseholdRepositoryError::query)?,
                    role: StoredRole::new(role),
                    member_count,
                })
            })
            .collect()
    }

    async fn member_count(&self, id: &HouseholdId) -> Result<u64, HouseholdRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = household_memberships::table
            .filter(household_memberships::household_id.eq(id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(to_count(count))
    }

    async fn update(&self, household: &Household) -> Result<bool, HouseholdRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = HouseholdUpdate {
            name: household.name.as_ref(),
            description: household.description.as_deref(),
            updated_at: household.updated_at,
        };
        let target = households::table.filter(households::id.eq(household.id.as_uuid()));
        let updated = diesel::update(target)
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &HouseholdId) -> Result<bool, HouseholdRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(households::table.filter(households::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
