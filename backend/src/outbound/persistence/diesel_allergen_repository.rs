//! PostgreSQL-backed `AllergenRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AllergenRepository, AllergenRepositoryError};
use crate::domain::{Allergen, AllergenId, HouseholdId};

use super::error_mapping::{
    convert_row, convert_rows, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::AllergenRow;
use super::pool::{DbPool, PoolError};
use super::schema::household_allergens;

/// Diesel-backed allergen storage.
#[derive(Clone)]
pub struct DieselAllergenRepository {
    pool: DbPool,
}

impl DieselAllergenRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AllergenRepositoryError {
    map_basic_pool_error(error, AllergenRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AllergenRepositoryError {
    map_basic_diesel_error(
        &error,
        AllergenRepositoryError::query,
        AllergenRepositoryError::connection,
    )
}

#[async_trait]
impl AllergenRepository for DieselAllergenRepository {
    async fn list_for_household(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Vec<Allergen>, AllergenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AllergenRow> = household_allergens::table
            .filter(household_allergens::household_id.eq(household_id.as_uuid()))
            .select(AllergenRow::as_select())
            .order_by(household_allergens::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, AllergenRepositoryError::query)
    }

    async fn find(&self, id: &AllergenId) -> Result<Option<Allergen>, AllergenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AllergenRow> = household_allergens::table
            .filter(household_allergens::id.eq(id.as_uuid()))
            .select(AllergenRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| convert_row(row, AllergenRepositoryError::query))
            .transpose()
    }

    async fn create(&self, allergen: &Allergen) -> Result<(), AllergenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(household_allergens::table)
            .values(AllergenRow::from(allergen))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AllergenRepositoryError::duplicate(allergen.name.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn delete(&self, id: &AllergenId) -> Result<bool, AllergenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = household_allergens::table.filter(household_allergens::id.eq(id.as_uuid()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
