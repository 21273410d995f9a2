//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AllergenCommand, AllergenQuery, CategoryQuery, HouseholdCommand, HouseholdQuery,
    InventoryCommand, InventoryQuery, LocationCommand, LocationQuery, LoginService, MemberCommand,
    MemberQuery, ProductLookup, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// Command and query halves are held separately so tests can stub one side
/// without implementing the other.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check for sign-in.
    pub login: Arc<dyn LoginService>,
    /// Current user profile.
    pub profile: Arc<dyn UserProfileQuery>,
    /// Household mutations.
    pub households: Arc<dyn HouseholdCommand>,
    /// Household reads.
    pub households_query: Arc<dyn HouseholdQuery>,
    /// Membership mutations.
    pub members: Arc<dyn MemberCommand>,
    /// Membership reads.
    pub members_query: Arc<dyn MemberQuery>,
    /// Allergen list mutations.
    pub allergens: Arc<dyn AllergenCommand>,
    /// Allergen list reads.
    pub allergens_query: Arc<dyn AllergenQuery>,
    /// Storage location mutations.
    pub locations: Arc<dyn LocationCommand>,
    /// Storage location reads.
    pub locations_query: Arc<dyn LocationQuery>,
    /// Inventory mutations.
    pub items: Arc<dyn InventoryCommand>,
    /// Inventory reads.
    pub items_query: Arc<dyn InventoryQuery>,
    /// Global category catalogue.
    pub categories: Arc<dyn CategoryQuery>,
    /// Barcode lookups.
    pub products: Arc<dyn ProductLookup>,
}
