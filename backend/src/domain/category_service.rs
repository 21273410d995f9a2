//! Category catalogue use-case.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CategoryQuery, CategoryRepository};
use crate::domain::{Category, Error};

/// Read-only access to the category catalogue.
pub struct CategoryService<C> {
    categories: Arc<C>,
}

impl<C> CategoryService<C> {
    /// Create a new service over `categories`.
    pub const fn new(categories: Arc<C>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl<C> CategoryQuery for CategoryService<C>
where
    C: CategoryRepository,
{
    async fn list(&self) -> Result<Vec<Category>, Error> {
        Ok(self.categories.list().await?)
    }
}
