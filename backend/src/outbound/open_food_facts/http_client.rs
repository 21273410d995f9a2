//! Reqwest-backed Open Food Facts catalogue adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into [`ProductInfo`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::warn;

use super::dto::LookupResponseDto;
use crate::domain::ports::{ProductCatalogue, ProductCatalogueError};
use crate::domain::{Barcode, ProductInfo};

const USER_AGENT: &str = concat!("pantrie-backend/", env!("CARGO_PKG_VERSION"));

/// Product catalogue adapter issuing `GET {base}/product/{barcode}.json`.
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// A trailing `/` on `base_url` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    fn product_url(&self, barcode: &Barcode) -> String {
        format!("{}/product/{barcode}.json", self.base_url)
    }
}

#[async_trait]
impl ProductCatalogue for OpenFoodFactsClient {
    async fn lookup(&self, barcode: &Barcode) -> Result<Option<ProductInfo>, ProductCatalogueError> {
        let response = self
            .client
            .get(self.product_url(barcode))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| map_transport_error(barcode, &error))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(barcode = %barcode, status = status.as_u16(), "Open Food Facts returned an error status");
            return Err(ProductCatalogueError::upstream(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(barcode, &error))?;
        parse_lookup(body.as_ref(), barcode)
    }
}

fn parse_lookup(
    body: &[u8],
    barcode: &Barcode,
) -> Result<Option<ProductInfo>, ProductCatalogueError> {
    let decoded: LookupResponseDto = serde_json::from_slice(body).map_err(|error| {
        warn!(barcode = %barcode, %error, "Open Food Facts returned unreadable JSON");
        ProductCatalogueError::decode(format!("invalid product JSON payload: {error}"))
    })?;
    Ok(decoded
        .into_found()
        .map(|product| product.into_product_info(barcode)))
}

fn map_transport_error(barcode: &Barcode, error: &reqwest::Error) -> ProductCatalogueError {
    if error.is_timeout() {
        warn!(barcode = %barcode, "Open Food Facts lookup timed out");
        ProductCatalogueError::timeout(error.to_string())
    } else {
        warn!(barcode = %barcode, %error, "Open Food Facts lookup failed");
        ProductCatalogueError::upstream(error.to_string())
    }
}
