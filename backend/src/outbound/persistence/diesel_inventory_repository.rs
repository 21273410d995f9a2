//! PostgreSQL-backed `InventoryRepository` implementation.
//!
//! Listings push filtering, ordering and paging into SQL so they agree with
//! [`ItemQuery::matches`] and [`ItemQuery::compare`]: PostgreSQL's default
//! `NULLS LAST` for ascending and `NULLS FIRST` for descending order is the
//! same placement the domain uses for missing expiration dates.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;

use crate::domain::ports::{InventoryRepository, InventoryRepositoryError};
use crate::domain::{
    HouseholdId, InventoryItem, InventoryItemId, ItemQuery, ItemSortField, SortOrder,
};

use super::error_mapping::{convert_row, convert_rows, map_basic_diesel_error, map_basic_pool_error};
use super::models::ItemRow;
use super::pool::{DbPool, PoolError};
use super::schema::inventory_items;

/// Diesel-backed inventory storage.
#[derive(Clone)]
pub struct DieselInventoryRepository {
    pool: DbPool,
}

impl DieselInventoryRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InventoryRepositoryError {
    map_basic_pool_error(error, InventoryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InventoryRepositoryError {
    map_basic_diesel_error(
        &error,
        InventoryRepositoryError::query,
        InventoryRepositoryError::connection,
    )
}

/// `%needle%` with LIKE metacharacters escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn filtered<'a>(
    household_id: &HouseholdId,
    query: &ItemQuery,
) -> inventory_items::BoxedQuery<'a, Pg> {
    let mut sql = inventory_items::table
        .filter(inventory_items::household_id.eq(*household_id.as_uuid()))
        .into_boxed();
    if let Some(category_id) = query.category_id {
        sql = sql.filter(inventory_items::category_id.eq(category_id.get()));
    }
    if let Some(location_id) = query.location_id {
        sql = sql.filter(inventory_items::location_id.eq(*location_id.as_uuid()));
    }
    if let Some(needle) = query.search.as_deref() {
        let pattern = like_pattern(needle);
        sql = sql.filter(
            inventory_items::name
                .ilike(pattern.clone())
                .or(inventory_items::description.ilike(pattern.clone()))
                .or(inventory_items::brand.ilike(pattern)),
        );
    }
    sql
}

fn ordered<'a>(
    sql: inventory_items::BoxedQuery<'a, Pg>,
    query: &ItemQuery,
) -> inventory_items::BoxedQuery<'a, Pg> {
    use inventory_items::{created_at, expiration_date, name, quantity_hundredths};

    let sql = match (query.sort_by, query.sort_order) {
        (ItemSortField::Name, SortOrder::Asc) => sql.order_by(name.asc()),
        (ItemSortField::Name, SortOrder::Desc) => sql.order_by(name.desc()),
        (ItemSortField::ExpirationDate, SortOrder::Asc) => sql.order_by(expiration_date.asc()),
        (ItemSortField::ExpirationDate, SortOrder::Desc) => sql.order_by(expiration_date.desc()),
        (ItemSortField::CreatedAt, SortOrder::Asc) => sql.order_by(created_at.asc()),
        (ItemSortField::CreatedAt, SortOrder::Desc) => sql.order_by(created_at.desc()),
        (ItemSortField::Quantity, SortOrder::Asc) => sql.order_by(quantity_hundredths.asc()),
        (ItemSortField::Quantity, SortOrder::Desc) => sql.order_by(quantity_hundredths.desc()),
    };
    sql.then_order_by(inventory_items::id.asc())
}

fn to_sql_bound(value: u64) -> Result<i64, InventoryRepositoryError> {
    i64::try_from(value).map_err(|_| InventoryRepositoryError::query("page bound exceeds i64 range"))
}

#[async_trait]
impl InventoryRepository for DieselInventoryRepository {
    async fn list(
        &self,
        household_id: &HouseholdId,
        query: &ItemQuery,
    ) -> Result<Page<InventoryItem>, InventoryRepositoryError> {
        let offset = to_sql_bound(query.page.offset())?;
        let limit = to_sql_bound(query.page.limit())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(household_id, query)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<ItemRow> = ordered(filtered(household_id, query), query)
            .select(ItemRow::as_select())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = convert_rows(rows, InventoryRepositoryError::query)?;
        Ok(Page::new(
            items,
            u64::try_from(total).unwrap_or_default(),
            query.page,
        ))
    }

    async fn find(
        &self,
        id: &InventoryItemId,
    ) -> Result<Option<InventoryItem>, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ItemRow> = inventory_items::table
            .filter(inventory_items::id.eq(id.as_uuid()))
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| convert_row(row, InventoryRepositoryError::query))
            .transpose()
    }

    async fn create(&self, item: &InventoryItem) -> Result<(), InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(inventory_items::table)
            .values(ItemRow::from(item))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, item: &InventoryItem) -> Result<bool, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ItemRow::from(item);
        let target = inventory_items::table.filter(inventory_items::id.eq(item.id.as_uuid()));
        let updated = diesel::update(target)
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &InventoryItemId) -> Result<bool, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = inventory_items::table.filter(inventory_items::id.eq(id.as_uuid()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
