//! PostgreSQL-backed `CategoryRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryId};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::CategoryRow;
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed read access to the seeded category catalogue.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    map_basic_pool_error(error, CategoryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_basic_diesel_error(
        &error,
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order_by(categories::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CategoryRow> = categories::table
            .filter(categories::id.eq(id.get()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Category::from))
    }
}
