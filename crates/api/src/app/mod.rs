//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: backend selection and shared domain services
//! - `routes/`: HTTP routes + handlers (one file per surface area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(
    admin_password: String,
    database_url: Option<String>,
) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(admin_password, database_url).await?);
    let admin_state = middleware::AdminState {
        sessions: services.sessions.clone(),
    };

    let gated = routes::admin::gated_router().layer(axum::middleware::from_fn_with_state(
        admin_state,
        middleware::admin_middleware,
    ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::catalog::router())
        .merge(routes::orders::router())
        .merge(routes::admin::router())
        .merge(gated)
        .layer(Extension(services))
        .layer(ServiceBuilder::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        build_app("hunter2".to_string(), None).await.unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = test_app()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn quote_prices_the_locker_scenario() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/quote",
                serde_json::json!({
                    "lines": [{"sku": "EGG-DOZ-001", "quantity": 3}],
                    "pickup": "locker_downtown",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["grand_total_cents"], 1850);
        assert_eq!(body["grand_total_display"], "18.50");
    }

    #[tokio::test]
    async fn quote_for_unknown_sku_is_404() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/quote",
                serde_json::json!({
                    "lines": [{"sku": "NO-SUCH-SKU", "quantity": 1}],
                    "pickup": "farm_pickup",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn oversold_order_is_a_conflict() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/orders",
                serde_json::json!({
                    "contact": {"name": "Dana", "email": "dana@example.com", "phone": "555-0100"},
                    "lines": [{"sku": "EGG-DOZ-001", "quantity": 99}],
                    "pickup": "farm_pickup",
                    "payment": "cash",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "insufficient_stock");
    }

    #[tokio::test]
    async fn wrong_admin_password_is_unauthorized() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/admin/login",
                serde_json::json!({"password": "guess"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_routes_require_a_session() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::get("/admin/stock/EGG-DOZ-001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_adjust_view_round_trip() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/admin/login",
                serde_json::json!({"password": "hunter2"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::post("/admin/stock/EGG-DOZ-001/adjust")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::from(
                        serde_json::json!({"new_quantity": 12, "notes": "morning collection"})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let tx = body_json(response).await;
        assert_eq!(tx["previous_stock"], 5);
        assert_eq!(tx["new_stock"], 12);
        assert_eq!(tx["quantity_change"], 7);

        let response = app
            .oneshot(
                Request::get("/admin/stock/EGG-DOZ-001")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let view = body_json(response).await;
        assert_eq!(view["quantity"], 12);
        assert_eq!(view["is_stale"], false);
    }

    #[tokio::test]
    async fn logged_out_token_is_rejected() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/admin/login",
                serde_json::json!({"password": "hunter2"}),
            ))
            .await
            .unwrap();
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::post("/admin/logout")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::get("/admin/stock/EGG-DOZ-001")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_product_reads_as_zero_stock() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::get("/stock/GONE-001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["stock"]["quantity"], 0);
    }

    #[tokio::test]
    async fn breed_listing_is_sorted_by_name() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::get("/products/chicks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let names: Vec<&str> = body["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Australorp", "Buff Orpington", "Rhode Island Red"]);
    }
}
