//! Builders for HTTP state over either storage backend.
//!
//! Every driving port is backed by a domain service; only the repositories
//! beneath them differ between PostgreSQL and the in-memory store.

use std::sync::Arc;

use actix_web::web;

use pantrie::domain::ports::{
    AllergenRepository, CategoryRepository, FixtureLoginService, HouseholdRepository,
    InventoryRepository, LocationRepository, MembershipRepository, ProductLookup,
    UserRepository,
};
use pantrie::domain::{
    AllergenService, CategoryService, HouseholdService, InventoryRepositories, InventoryService,
    LocationService, MemberService, ProductService, ProfileService,
};
use pantrie::inbound::http::state::HttpState;
use pantrie::outbound::memory::InMemoryStore;
use pantrie::outbound::open_food_facts::OpenFoodFactsClient;
use pantrie::outbound::persistence::{
    DbPool, DieselAllergenRepository, DieselCategoryRepository, DieselHouseholdRepository,
    DieselInventoryRepository, DieselLocationRepository, DieselMembershipRepository,
    DieselUserRepository,
};
use tracing::info;

use super::ServerConfig;
use super::config::LookupConfig;

/// One repository per driven port.
struct Repositories<U, H, M, A, L, C, I> {
    users: Arc<U>,
    households: Arc<H>,
    memberships: Arc<M>,
    allergens: Arc<A>,
    locations: Arc<L>,
    categories: Arc<C>,
    items: Arc<I>,
}

type DieselRepositories = Repositories<
    DieselUserRepository,
    DieselHouseholdRepository,
    DieselMembershipRepository,
    DieselAllergenRepository,
    DieselLocationRepository,
    DieselCategoryRepository,
    DieselInventoryRepository,
>;

type MemoryRepositories = Repositories<
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
>;

fn diesel_repositories(pool: &DbPool) -> DieselRepositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        households: Arc::new(DieselHouseholdRepository::new(pool.clone())),
        memberships: Arc::new(DieselMembershipRepository::new(pool.clone())),
        allergens: Arc::new(DieselAllergenRepository::new(pool.clone())),
        locations: Arc::new(DieselLocationRepository::new(pool.clone())),
        categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
        items: Arc::new(DieselInventoryRepository::new(pool.clone())),
    }
}

fn memory_repositories(store: Arc<InMemoryStore>) -> MemoryRepositories {
    Repositories {
        users: store.clone(),
        households: store.clone(),
        memberships: store.clone(),
        allergens: store.clone(),
        locations: store.clone(),
        categories: store.clone(),
        items: store,
    }
}

fn state_over<U, H, M, A, L, C, I>(
    repos: Repositories<U, H, M, A, L, C, I>,
    products: Arc<dyn ProductLookup>,
) -> HttpState
where
    U: UserRepository + 'static,
    H: HouseholdRepository + 'static,
    M: MembershipRepository + 'static,
    A: AllergenRepository + 'static,
    L: LocationRepository + 'static,
    C: CategoryRepository + 'static,
    I: InventoryRepository + 'static,
{
    let Repositories {
        users,
        households,
        memberships,
        allergens,
        locations,
        categories,
        items,
    } = repos;

    let household_service = Arc::new(HouseholdService::new(households, memberships.clone()));
    let member_service = Arc::new(MemberService::new(memberships.clone(), users.clone()));
    let allergen_service = Arc::new(AllergenService::new(allergens.clone(), memberships.clone()));
    let location_service = Arc::new(LocationService::new(locations.clone(), memberships.clone()));
    let inventory_service = Arc::new(InventoryService::new(InventoryRepositories {
        items,
        allergens,
        locations,
        categories: categories.clone(),
        memberships,
    }));

    HttpState {
        login: Arc::new(FixtureLoginService),
        profile: Arc::new(ProfileService::new(users)),
        households: household_service.clone(),
        households_query: household_service,
        members: member_service.clone(),
        members_query: member_service,
        allergens: allergen_service.clone(),
        allergens_query: allergen_service,
        locations: location_service.clone(),
        locations_query: location_service,
        items: inventory_service.clone(),
        items_query: inventory_service,
        categories: Arc::new(CategoryService::new(categories)),
        products,
    }
}

/// Build the barcode lookup use-case over Open Food Facts.
///
/// # Errors
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(crate) fn build_open_food_facts_lookup(
    lookup: &LookupConfig,
) -> std::io::Result<Arc<dyn ProductLookup>> {
    let client = OpenFoodFactsClient::new(lookup.base_url.clone(), lookup.timeout)
        .map_err(|e| std::io::Error::other(format!("product lookup client failed: {e}")))?;
    Ok(Arc::new(ProductService::new(Arc::new(client))))
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise over
/// the in-memory store.
pub(crate) fn build_http_state(
    config: &ServerConfig,
    products: Arc<dyn ProductLookup>,
) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_over(diesel_repositories(pool), products),
        None => {
            info!("no database configured; serving from the in-memory store");
            let store = config
                .memory_store
                .clone()
                .unwrap_or_else(|| Arc::new(InMemoryStore::new()));
            state_over(memory_repositories(store), products)
        }
    };
    web::Data::new(state)
}
