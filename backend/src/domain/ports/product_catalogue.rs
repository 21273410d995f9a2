//! Port for external product databases queried by barcode.

use async_trait::async_trait;

use crate::domain::{Barcode, ProductInfo};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product catalogue adapters.
    pub enum ProductCatalogueError {
        /// The upstream service failed or answered with an error status.
        Upstream { message: String } =>
            "product database unavailable: {message}" => service_unavailable,
        /// The upstream service did not answer in time.
        Timeout { message: String } =>
            "product database timed out: {message}" => service_unavailable,
        /// The upstream answer could not be understood.
        Decode { message: String } =>
            "product database returned an unreadable response: {message}" => service_unavailable,
    }
}

/// Lookup of product metadata by barcode.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogue: Send + Sync {
    /// Product details, or `None` when the barcode is unknown upstream.
    async fn lookup(&self, barcode: &Barcode) -> Result<Option<ProductInfo>, ProductCatalogueError>;
}

/// Catalogue that knows no products, used when lookups are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductCatalogue;

#[async_trait]
impl ProductCatalogue for FixtureProductCatalogue {
    async fn lookup(
        &self,
        _barcode: &Barcode,
    ) -> Result<Option<ProductInfo>, ProductCatalogueError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_catalogue_knows_nothing() {
        let barcode = Barcode::new("3017620422003").expect("barcode");
        let result = FixtureProductCatalogue.lookup(&barcode).await;
        assert_eq!(result, Ok(None));
    }
}
