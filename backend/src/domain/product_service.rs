//! Barcode lookup use-case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ProductCatalogue, ProductLookup};
use crate::domain::{Barcode, Error, ProductInfo};

/// Product lookup service backed by an external catalogue.
pub struct ProductService<P> {
    catalogue: Arc<P>,
}

impl<P> ProductService<P> {
    /// Create a new service over `catalogue`.
    pub const fn new(catalogue: Arc<P>) -> Self {
        Self { catalogue }
    }
}

#[async_trait]
impl<P> ProductLookup for ProductService<P>
where
    P: ProductCatalogue,
{
    async fn lookup(&self, barcode: &Barcode) -> Result<ProductInfo, Error> {
        match self.catalogue.lookup(barcode).await? {
            Some(product) => Ok(product),
            None => {
                info!(barcode = %barcode, "barcode not found in product database");
                Err(Error::not_found(format!(
                    "no product found for barcode {barcode}"
                )))
            }
        }
    }
}
