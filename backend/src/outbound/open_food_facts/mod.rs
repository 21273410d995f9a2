//! Open Food Facts outbound adapter.
//!
//! A thin HTTP implementation of the `ProductCatalogue` port over the public
//! Open Food Facts v2 API.

mod dto;
mod http_client;

pub use http_client::OpenFoodFactsClient;
