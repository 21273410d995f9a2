//! Reference data: the category catalogue and barcode product lookups.
//!
//! ```text
//! GET /api/v1/categories
//! GET /api/v1/barcode/{barcode}
//! ```

use actix_web::{get, web};

use crate::domain::{Barcode, Category, Error, ProductInfo};
use crate::inbound::http::session::ActorSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, FieldName};
use crate::inbound::http::ApiResult;

const BARCODE: FieldName = FieldName::new("barcode");

/// Every item category.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories", body = [Category]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["reference"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    session: ActorSession,
) -> ApiResult<web::Json<Vec<Category>>> {
    session.require_actor()?;
    Ok(web::Json(state.categories.list().await?))
}

/// Look a product up by barcode in the external food database.
#[utoipa::path(
    get,
    path = "/api/v1/barcode/{barcode}",
    params(("barcode" = String, Path, description = "EAN or UPC digits")),
    responses(
        (status = 200, description = "Product found", body = ProductInfo),
        (status = 400, description = "Malformed barcode", body = Error),
        (status = 404, description = "Product not found", body = Error),
        (status = 503, description = "Lookup service unavailable", body = Error)
    ),
    tags = ["reference"],
    operation_id = "lookupBarcode"
)]
#[get("/barcode/{barcode}")]
pub async fn lookup_barcode(
    state: web::Data<HttpState>,
    session: ActorSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductInfo>> {
    session.require_actor()?;
    let barcode =
        Barcode::new(path.as_str()).map_err(|err| invalid_value_error(BARCODE, err.to_string()))?;
    Ok(web::Json(state.products.lookup(&barcode).await?))
}
