//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod allergens;
pub mod error;
pub mod health;
pub mod households;
pub mod items;
pub mod locations;
pub mod members;
pub mod reference;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{extractor_configs, ApiResult};

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller owns the scope so the server and handler tests can wrap it
/// with their own session middleware.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(households::list_households)
        .service(households::create_household)
        .service(households::get_household)
        .service(households::update_household)
        .service(households::delete_household)
        .service(members::list_members)
        .service(members::add_member)
        .service(members::change_member_role)
        .service(members::remove_member)
        .service(allergens::list_allergens)
        .service(allergens::create_allergen)
        .service(allergens::delete_allergen)
        .service(locations::list_locations)
        .service(locations::create_location)
        .service(locations::get_location)
        .service(locations::update_location)
        .service(locations::delete_location)
        .service(items::list_items)
        .service(items::create_item)
        .service(items::get_item)
        .service(items::update_item)
        .service(items::delete_item)
        .service(reference::list_categories)
        .service(reference::lookup_barcode);
}
