use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use farmstand_core::DomainError;

/// Map a domain error to its HTTP status + JSON envelope.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::InvalidQuantity(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_quantity", msg)
        }
        DomainError::InsufficientStock(sku) => json_error(
            StatusCode::CONFLICT,
            "insufficient_stock",
            format!("insufficient stock for {sku}"),
        ),
        DomainError::EmptyOrder => json_error(
            StatusCode::BAD_REQUEST,
            "empty_order",
            "order contains no line items",
        ),
        DomainError::MissingContactInfo(field) => json_error(
            StatusCode::BAD_REQUEST,
            "missing_contact_info",
            format!("missing contact info: {field}"),
        ),
        DomainError::StoreUnavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        DomainError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
