use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use farmstand_admin::SessionToken;
use farmstand_core::Sku;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AdminContext;
use crate::middleware::extract_bearer;

/// Login/logout: reachable without a session.
pub fn router() -> Router {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
}

/// Everything that reads or writes stock sits behind the admin middleware.
pub fn gated_router() -> Router {
    Router::new()
        .route("/admin/stock/:sku", get(view_stock))
        .route("/admin/stock/:sku/adjust", post(adjust_stock))
}

async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.sessions.login(&body.password) {
        Ok(token) => (
            StatusCode::OK,
            Json(json!({ "token": token.to_string() })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Dropping an unknown or absent token is a no-op, so logout always
/// succeeds.
async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> StatusCode {
    if let Some(raw) = extract_bearer(&headers)
        && let Ok(token) = SessionToken::from_str(raw)
    {
        services.sessions.logout(&token);
    }
    StatusCode::NO_CONTENT
}

async fn view_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(sku): Path<String>,
) -> axum::response::Response {
    let sku = match Sku::new(sku) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.panel.view_current_stock(admin.token(), &sku).await {
        Ok(view) => (
            StatusCode::OK,
            Json(json!({
                "sku": sku.as_str(),
                "quantity": view.quantity,
                "last_updated": view.last_updated,
                "staleness_hours": view.staleness_hours,
                "is_stale": view.is_stale,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(sku): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    let sku = match Sku::new(sku) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .panel
        .adjust_stock(admin.token(), &sku, body.new_quantity, &body.notes)
        .await
    {
        Ok(tx) => (StatusCode::OK, Json(dto::transaction_to_json(&tx))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
