//! PostgreSQL-backed `LocationRepository` implementation.
//!
//! Deleting a location leaves its items in place; the foreign key clears
//! their `location_id`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{HouseholdId, Location, LocationId};

use super::error_mapping::{
    convert_row, convert_rows, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{LocationRow, LocationUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::locations;

/// Diesel-backed location storage.
#[derive(Clone)]
pub struct DieselLocationRepository {
    pool: DbPool,
}

impl DieselLocationRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LocationRepositoryError {
    map_basic_pool_error(error, LocationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LocationRepositoryError {
    map_basic_diesel_error(
        &error,
        LocationRepositoryError::query,
        LocationRepositoryError::connection,
    )
}

fn map_write_error(error: diesel::result::Error, location: &Location) -> LocationRepositoryError {
    if is_unique_violation(&error) {
        LocationRepositoryError::duplicate(location.name.as_ref())
    } else {
        map_diesel_error(error)
    }
}

#[async_trait]
impl LocationRepository for DieselLocationRepository {
    async fn list_for_household(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LocationRow> = locations::table
            .filter(locations::household_id.eq(household_id.as_uuid()))
            .select(LocationRow::as_select())
            .order_by(locations::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, LocationRepositoryError::query)
    }

    async fn find(&self, id: &LocationId) -> Result<Option<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LocationRow> = locations::table
            .filter(locations::id.eq(id.as_uuid()))
            .select(LocationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| convert_row(row, LocationRepositoryError::query))
            .transpose()
    }

    async fn create(&self, location: &Location) -> Result<(), LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(locations::table)
            .values(LocationRow::from(location))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, location))
    }

    async fn update(&self, location: &Location) -> Result<bool, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = LocationUpdate {
            name: location.name.as_ref(),
            description: location.description.as_deref(),
            icon: location.icon.as_deref(),
            updated_at: location.updated_at,
        };
        let target = locations::table.filter(locations::id.eq(location.id.as_uuid()));
        let updated = diesel::update(target)
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, location))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &LocationId) -> Result<bool, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(locations::table.filter(locations::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
