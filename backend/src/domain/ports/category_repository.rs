//! Port for the read-only category catalogue.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}" => service_unavailable,
        /// Query failed during execution.
        Query { message: String } =>
            "category repository query failed: {message}" => internal,
    }
}

/// Read access to item categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch one category by id.
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError>;
}
