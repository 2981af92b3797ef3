use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use farmstand_catalog::Category;
use farmstand_core::Sku;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/products/:category", get(list_products))
        .route("/stock/:sku", get(stock_level))
        .route("/stock/category/:category", get(category_stock))
}

async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category): Path<String>,
) -> axum::response::Response {
    let category: Category = match category.parse() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let products = services.store.list_available(category).await;
    (
        StatusCode::OK,
        Json(json!({
            "category": category.as_str(),
            "products": products.iter().map(dto::product_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

async fn stock_level(
    Extension(services): Extension<Arc<AppServices>>,
    Path(sku): Path<String>,
) -> axum::response::Response {
    let sku = match Sku::new(sku) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Sold out and unreachable read the same here: a zero snapshot.
    let snapshot = services.store.stock_level(&sku).await;
    (
        StatusCode::OK,
        Json(json!({
            "sku": sku.as_str(),
            "stock": dto::snapshot_to_json(&snapshot),
        })),
    )
        .into_response()
}

async fn category_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category): Path<String>,
) -> axum::response::Response {
    let category: Category = match category.parse() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let snapshot = services.store.aggregate_stock(category).await;
    (
        StatusCode::OK,
        Json(json!({
            "category": category.as_str(),
            "stock": dto::snapshot_to_json(&snapshot),
        })),
    )
        .into_response()
}
