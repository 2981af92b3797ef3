use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::json;

use farmstand_orders::OrderLineRequest;
use farmstand_pricing::{CartLineItem, price_order};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/quote", post(quote))
        .route("/orders", post(submit_order))
}

/// Price a cart without committing to anything.
async fn quote(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::QuoteRequest>,
) -> axum::response::Response {
    let mut cart = Vec::with_capacity(body.lines.len());
    for line in &body.lines {
        let product = match services.store.get_product(&line.sku).await {
            Ok(p) => p,
            Err(e) => return errors::domain_error_to_response(e),
        };
        cart.push(CartLineItem::from_product(&product, line.quantity));
    }

    match price_order(&cart, body.pickup) {
        Ok(quote) => (StatusCode::OK, Json(dto::quote_to_json(&quote))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn submit_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::OrderRequest>,
) -> axum::response::Response {
    let lines: Vec<OrderLineRequest> = body
        .lines
        .into_iter()
        .map(|l| OrderLineRequest {
            sku: l.sku,
            quantity: l.quantity,
        })
        .collect();

    let confirmation = match services
        .intake
        .submit_order(body.contact, &lines, body.pickup, body.payment, &body.notes)
        .await
    {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(json!({
            "contact": confirmation.contact,
            "quote": dto::quote_to_json(&confirmation.quote),
            "payment": confirmation.payment,
            "notes": confirmation.notes,
            "message": confirmation.message,
        })),
    )
        .into_response()
}
