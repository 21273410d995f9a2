//! Tests for inventory item handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use pagination::{Page, PageRequest};
use rstest::{fixture, rstest};
use serde_json::{json, Value};

use super::*;
use crate::domain::ports::{MockInventoryCommand, MockInventoryQuery};
use crate::domain::{Allergen, AllergenName, InventoryItem, UserId};
use crate::inbound::http::test_utils::{session_cookie, test_app, TestPorts};

#[fixture]
fn household() -> HouseholdId {
    HouseholdId::random()
}

fn view(household: HouseholdId, draft: ItemDraft) -> ItemView {
    let peanut = Allergen::new(household, AllergenName::new("peanut").expect("allergen"));
    ItemView::annotate(
        InventoryItem::create(household, UserId::random(), draft),
        &[peanut],
    )
}

#[rstest]
#[case(json!(2), 200)]
#[case(json!("1.5"), 150)]
#[case(json!(" 0.25 "), 25)]
fn quantities_accept_numbers_and_strings(#[case] raw: Value, #[case] hundredths: i64) {
    assert_eq!(quantity(raw).expect("valid").hundredths(), hundredths);
}

#[rstest]
#[case(json!(0))]
#[case(json!("-1"))]
#[case(json!("1.005"))]
#[case(json!(true))]
fn bad_quantities_name_the_field(#[case] raw: Value) {
    let err = quantity(raw).expect_err("invalid quantity");
    assert_eq!(err.details().expect("details")["field"], "quantity");
}

#[rstest]
fn listing_defaults_follow_the_query_model() {
    let query = ItemQuery::try_from(ListItemsParams::default()).expect("defaults");
    assert_eq!(query.page, PageRequest::default());
    assert_eq!(query.sort_by, ItemSortField::CreatedAt);
    assert_eq!(query.sort_order, SortOrder::Desc);
    assert!(query.search.is_none());
}

#[rstest]
#[case(ListItemsParams { page: Some(0), ..ListItemsParams::default() }, "page")]
#[case(ListItemsParams { page_size: Some(101), ..ListItemsParams::default() }, "pageSize")]
#[case(ListItemsParams { location_id: Some("shelf".into()), ..ListItemsParams::default() }, "locationId")]
fn listing_rejects_bad_parameters(#[case] params: ListItemsParams, #[case] field: &str) {
    let err = ItemQuery::try_from(params).expect_err("invalid params");
    assert_eq!(err.details().expect("details")["field"], field);
}

#[rstest]
fn update_distinguishes_clearing_from_leaving() {
    let body: UpdateItemRequest =
        serde_json::from_value(json!({ "locationId": null, "notes": "  " })).expect("body");
    let changes = ItemChanges::try_from(body).expect("changes");
    assert_eq!(changes.location_id, Some(None));
    assert_eq!(changes.notes, Some(None));
    assert!(changes.category_id.is_none());
    assert!(changes.quantity.is_none());
}

#[rstest]
#[actix_web::test]
async fn create_returns_allergen_warnings(household: HouseholdId) {
    let mut command = MockInventoryCommand::new();
    command
        .expect_create()
        .times(1)
        .withf(|_, _, draft| draft.quantity.hundredths() == 200 && draft.unit.is_none())
        .return_once(|_, household, draft| Ok(view(*household, draft)));
    let ports = TestPorts {
        items: Some(Arc::new(command)),
        ..TestPorts::default()
    };
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, &UserId::random()).await;

    let req = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/households/{household}/items"))
        .cookie(cookie)
        .set_json(json!({
            "name": "Satay sauce",
            "quantity": "2",
            "unit": " ",
            "ingredients": "Water, PEANUTS, salt"
        }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["allergenWarnings"], json!(["peanut"]));
    assert_eq!(value["quantity"], "2.00");
}

#[rstest]
#[actix_web::test]
async fn create_requires_a_quantity(household: HouseholdId) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = session_cookie(&app, &UserId::random()).await;

    let req = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/households/{household}/items"))
        .cookie(cookie)
        .set_json(json!({ "name": "Rice" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["details"]["field"], "quantity");
    assert_eq!(value["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn list_passes_filters_and_returns_a_page(household: HouseholdId) {
    let mut query = MockInventoryQuery::new();
    query
        .expect_list()
        .times(1)
        .withf(|_, _, query| {
            query.page.page() == 2
                && query.page.page_size() == 5
                && query.search.as_deref() == Some("jam")
                && query.sort_by == ItemSortField::ExpirationDate
                && query.sort_order == SortOrder::Asc
        })
        .return_once(move |_, household, query| {
            let draft = ItemDraft::new(
                ItemName::new("Jam").expect("name"),
                "1".parse().expect("quantity"),
            );
            Ok(Page::new(vec![view(*household, draft)], 6, query.page))
        });
    let ports = TestPorts {
        items_query: Some(Arc::new(query)),
        ..TestPorts::default()
    };
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, &UserId::random()).await;

    let req = actix_test::TestRequest::get()
        .uri(&format!(
            "/api/v1/households/{household}/items?page=2&pageSize=5&search=%20jam%20&sortBy=expiration_date&sortOrder=asc"
        ))
        .cookie(cookie)
        .to_request();
    let value: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(value["total"], 6);
    assert_eq!(value["totalPages"], 2);
    assert_eq!(value["pageSize"], 5);
    assert_eq!(value["items"][0]["allergenWarnings"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn unknown_sort_fields_are_malformed_queries(household: HouseholdId) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = session_cookie(&app, &UserId::random()).await;

    let req = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/households/{household}/items?sortBy=colour"))
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["details"]["code"], "malformed");
}

#[rstest]
#[actix_web::test]
async fn delete_returns_204() {
    let mut command = MockInventoryCommand::new();
    command.expect_delete().times(1).return_once(|_, _| Ok(()));
    let ports = TestPorts {
        items: Some(Arc::new(command)),
        ..TestPorts::default()
    };
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, &UserId::random()).await;

    let req = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/items/{}", InventoryItemId::random()))
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
