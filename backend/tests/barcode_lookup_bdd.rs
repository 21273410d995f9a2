//! Behaviour tests for barcode lookups through the live HTTP stack.
//!
//! The external product database is replaced by a recording double so the
//! scenarios can assert which barcodes reach it.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// The harness carries helpers for the inventory scenarios as well.
#[allow(dead_code)]
mod pantry_harness;

use actix_web::http::Method;
use pantrie::domain::ports::{DEVELOPMENT_USERNAME, ProductCatalogueError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

use pantry_harness::doubles::{CatalogueResponse, spread};
use pantry_harness::harness::{
    self, WorldFixture, last_body, last_status, request, sign_in_admin,
};

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

#[given("a running Pantrie server")]
fn a_running_pantrie_server(world: &WorldFixture) {
    sign_in_admin(&world.world());
}

#[given("the product database knows barcode \"{barcode}\"")]
fn the_product_database_knows(world: &WorldFixture, barcode: String) {
    world
        .world()
        .borrow()
        .catalogue
        .set_response(CatalogueResponse::Ok(Some(spread(&barcode))));
}

#[given("the product database is unreachable")]
fn the_product_database_is_unreachable(world: &WorldFixture) {
    world
        .world()
        .borrow()
        .catalogue
        .set_response(CatalogueResponse::Err(ProductCatalogueError::upstream(
            "connection refused",
        )));
}

#[when("the client looks up barcode \"{barcode}\"")]
fn the_client_looks_up(world: &WorldFixture, barcode: String) {
    request(
        &world.world(),
        Some(DEVELOPMENT_USERNAME),
        Method::GET,
        &format!("/api/v1/barcode/{barcode}"),
        None,
    );
}

#[when("an anonymous client looks up barcode \"{barcode}\"")]
fn an_anonymous_client_looks_up(world: &WorldFixture, barcode: String) {
    request(
        &world.world(),
        None,
        Method::GET,
        &format!("/api/v1/barcode/{barcode}"),
        None,
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(last_status(&world.world()), status);
}

#[then("the product is named \"{name}\"")]
fn the_product_is_named(world: &WorldFixture, name: String) {
    let body = last_body(&world.world());
    assert_eq!(body.get("name").and_then(Value::as_str), Some(name.as_str()));
    assert_eq!(
        body.get("source").and_then(Value::as_str),
        Some("Open Food Facts")
    );
}

#[then("the catalogue was asked for \"{barcode}\"")]
fn the_catalogue_was_asked_for(world: &WorldFixture, barcode: String) {
    assert_eq!(world.world().borrow().catalogue.calls(), vec![barcode]);
}

#[then("the catalogue was not asked")]
fn the_catalogue_was_not_asked(world: &WorldFixture) {
    assert!(world.world().borrow().catalogue.calls().is_empty());
}

#[scenario(
    path = "tests/features/barcode_lookup.feature",
    name = "A known barcode returns product details"
)]
fn known_barcode(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/barcode_lookup.feature",
    name = "An unknown barcode is not found"
)]
fn unknown_barcode(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/barcode_lookup.feature",
    name = "An unreachable product database is reported as unavailable"
)]
fn unreachable_catalogue(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/barcode_lookup.feature",
    name = "Malformed barcodes never reach the product database"
)]
fn malformed_barcode(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/barcode_lookup.feature",
    name = "Lookups require a session"
)]
fn anonymous_lookup(world: WorldFixture) {
    drop(world);
}
