//! Recording doubles for driven ports that reach outside the process.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use pantrie::domain::ports::{
    DEVELOPMENT_USERNAME, FixtureLoginService, LoginService, ProductCatalogue,
    ProductCatalogueError, UserRepository,
};
use pantrie::domain::{Barcode, Email, Error, LoginCredentials, ProductInfo, UserId};
use pantrie::outbound::memory::InMemoryStore;

use super::recording_double_macro::recording_double;

recording_double! {
    /// Answer handed back by [`RecordingProductCatalogue`].
    pub(crate) enum CatalogueResponse {
        Ok(Option<ProductInfo>),
        Err(ProductCatalogueError),
    }

    /// Product catalogue that records looked-up barcodes.
    pub(crate) struct RecordingProductCatalogue {
        calls: String,
        trait: ProductCatalogue,
        method: lookup(&self, barcode: &Barcode) -> Result<Option<ProductInfo>, ProductCatalogueError>,
        record: barcode.to_string(),
    }
}

/// A plausible hazelnut spread for `barcode`.
pub(crate) fn spread(barcode: &str) -> ProductInfo {
    ProductInfo {
        barcode: Barcode::new(barcode).expect("fixture barcode"),
        name: "Hazelnut spread".to_owned(),
        description: Some("Sweet spread".to_owned()),
        brand: Some("Acme".to_owned()),
        categories: vec!["en:spreads".to_owned()],
        image_url: None,
        quantity: Some("400 g".to_owned()),
        serving_size: Some("15 g".to_owned()),
        ingredients: Some("Sugar, Palm Oil, Hazelnuts 13%, Skimmed Milk Powder".to_owned()),
        allergens: Some("Milk, Nuts".to_owned()),
        nutrition_grade: Some("e".to_owned()),
        nutrition_facts: BTreeMap::from([("calories".to_owned(), 80.9)]),
        labels: Vec::new(),
        stores: None,
        countries: Some("France".to_owned()),
        source: "Open Food Facts".to_owned(),
        source_url: format!("https://world.openfoodfacts.org/product/{barcode}"),
    }
}

/// Password every seeded account signs in with.
pub(crate) const SEEDED_PASSWORD: &str = "password";

/// Authenticator admitting any account in the store by e-mail.
///
/// The development account is also admitted by its `admin` username.
#[derive(Clone)]
pub(crate) struct SeededLoginService {
    store: Arc<InMemoryStore>,
}

impl SeededLoginService {
    pub(crate) const fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LoginService for SeededLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == DEVELOPMENT_USERNAME {
            return FixtureLoginService.authenticate(credentials).await;
        }
        let email = Email::new(credentials.username())
            .map_err(|_| Error::unauthorized("invalid credentials"))?;
        let user = UserRepository::find_by_email(self.store.as_ref(), &email)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        match user {
            Some(user) if credentials.password() == SEEDED_PASSWORD => Ok(user.id().clone()),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
