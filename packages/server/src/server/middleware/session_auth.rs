use crate::server::app::AppState;
use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Marker stored in request extensions for requests carrying a live admin
/// session
#[derive(Clone, Copy, Debug)]
pub struct AdminUser;

/// Middleware to extract the session token and mark admin requests
///
/// This middleware:
/// 1. Extracts the session token from the Authorization header
/// 2. Looks up the session in the SessionStore
/// 3. Stores AdminUser in request extensions when the session is live
///
/// Note: This middleware does NOT block requests - it only extracts auth
/// info. Blocking happens in `require_admin`.
pub async fn session_auth_middleware(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        if state.sessions.get_session(token).await.is_some() {
            request.extensions_mut().insert(AdminUser);
        }
    }

    next.run(request).await
}

/// Middleware that rejects requests lacking a live admin session
pub async fn require_admin(request: Request, next: Next) -> Response {
    if request.extensions().get::<AdminUser>().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Authentication required" })),
        )
            .into_response();
    }

    next.run(request).await
}

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    Some(auth_str.strip_prefix("Bearer ").unwrap_or(auth_str))
}
