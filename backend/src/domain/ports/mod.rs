//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ProductCatalogue`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`, [`ProductLookup`],
//! [`LoginService`]) are implemented by domain services and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod allergen_repository;
mod allergens;
mod category_repository;
mod household_repository;
mod households;
mod inventory;
mod inventory_repository;
mod location_repository;
mod locations;
mod login_service;
mod members;
mod membership_repository;
mod product_catalogue;
mod product_lookup;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use allergen_repository::MockAllergenRepository;
pub use allergen_repository::{AllergenRepository, AllergenRepositoryError};
#[cfg(test)]
pub use allergens::{MockAllergenCommand, MockAllergenQuery};
pub use allergens::{AllergenCommand, AllergenQuery};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use household_repository::MockHouseholdRepository;
pub use household_repository::{
    HouseholdListing, HouseholdRepository, HouseholdRepositoryError,
};
#[cfg(test)]
pub use households::{MockHouseholdCommand, MockHouseholdQuery};
pub use households::{HouseholdCommand, HouseholdQuery};
#[cfg(test)]
pub use inventory::{MockInventoryCommand, MockInventoryQuery};
pub use inventory::{InventoryCommand, InventoryQuery};
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
pub use inventory_repository::{InventoryRepository, InventoryRepositoryError};
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::{LocationRepository, LocationRepositoryError};
#[cfg(test)]
pub use locations::{MockLocationCommand, MockLocationQuery};
pub use locations::{LocationCommand, LocationQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    DEVELOPMENT_DISPLAY_NAME, DEVELOPMENT_USER_EMAIL, DEVELOPMENT_USER_ID, DEVELOPMENT_USERNAME,
    FixtureLoginService,
    LoginService,
};
#[cfg(test)]
pub use members::{MockMemberCommand, MockMemberQuery};
pub use members::{MemberCommand, MemberQuery};
#[cfg(test)]
pub use membership_repository::MockMembershipRepository;
pub use membership_repository::{MembershipRepository, MembershipRepositoryError};
#[cfg(test)]
pub use product_catalogue::MockProductCatalogue;
pub use product_catalogue::{FixtureProductCatalogue, ProductCatalogue, ProductCatalogueError};
#[cfg(test)]
pub use product_lookup::{MockCategoryQuery, MockProductLookup};
pub use product_lookup::{CategoryQuery, ProductLookup};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
