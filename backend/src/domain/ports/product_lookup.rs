//! Driving ports for reference data: barcode lookups and categories.

use async_trait::async_trait;

use crate::domain::{Barcode, Category, Error, ProductInfo};

/// Barcode lookup use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Product details for `barcode`; `NotFound` when unknown.
    async fn lookup(&self, barcode: &Barcode) -> Result<ProductInfo, Error>;
}

/// Category catalogue use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// All item categories.
    async fn list(&self) -> Result<Vec<Category>, Error>;
}
