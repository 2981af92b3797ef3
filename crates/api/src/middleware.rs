use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use farmstand_admin::{SessionStore, SessionToken};

use crate::context::AdminContext;

#[derive(Clone)]
pub struct AdminState {
    pub sessions: Arc<SessionStore>,
}

/// Resolves the bearer token into an [`AdminContext`].
///
/// Tokens come from `POST /admin/login`; anything missing, malformed, or
/// logged out is a 401 before the handler runs.
pub async fn admin_middleware(
    State(state): State<AdminState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let raw = extract_bearer(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;
    let token = SessionToken::from_str(raw).map_err(|_| StatusCode::UNAUTHORIZED)?;

    state
        .sessions
        .require(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(AdminContext::new(token));

    Ok(next.run(req).await)
}

pub(crate) fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
