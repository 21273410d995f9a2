//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and the table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures become the port's
//!   `Connection`, `Query` or `Duplicate` variants.
//!
//! # Example
//!
//! ```no_run
//! use pantrie::outbound::persistence::{DbPool, DieselHouseholdRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pantrie")).await?;
//! let households = DieselHouseholdRepository::new(pool);
//! # let _ = households;
//! # Ok(())
//! # }
//! ```

mod diesel_allergen_repository;
mod diesel_category_repository;
mod diesel_household_repository;
mod diesel_inventory_repository;
mod diesel_location_repository;
mod diesel_membership_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_allergen_repository::DieselAllergenRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_household_repository::DieselHouseholdRepository;
pub use diesel_inventory_repository::DieselInventoryRepository;
pub use diesel_location_repository::DieselLocationRepository;
pub use diesel_membership_repository::DieselMembershipRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
