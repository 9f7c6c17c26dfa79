//! Admin routes: login, the response table, CSV export, bulk clear
//!
//! Everything except login sits behind `require_admin`; the handlers here
//! can assume a live session.

use axum::{
    extract::{Extension, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domains::rsvp::viewer::{self, AttendanceFilter, SortKey};
use crate::server::app::AppState;
use crate::server::auth::AdminSession;
use crate::server::middleware::bearer_token;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Shared-secret login; answers a session token on success
///
/// The secret gates the admin pages against casual visitors, nothing more.
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> Response {
    if body.password != state.admin_password {
        tracing::warn!("Rejected admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid password. Please try again." })),
        )
            .into_response();
    }

    let token = state.sessions.create_session(AdminSession::started_now()).await;
    tracing::info!("Admin logged in");
    Json(json!({ "token": token })).into_response()
}

/// Logout: drop the session behind the bearer token
pub async fn logout(Extension(state): Extension<AppState>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.delete_session(token).await;
    }
    StatusCode::NO_CONTENT
}

/// Query controls shared by the response table and the export
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub filter: AttendanceFilter,
}

/// The response table: a store snapshot, sorted then filtered
pub async fn list_responses(
    Extension(state): Extension<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<Value> {
    let responses = viewer::visible(state.store.list().await, query.sort, query.filter);
    Json(json!({ "responses": responses }))
}

/// CSV export of the visible set, served as a dated attachment
pub async fn export_responses(
    Extension(state): Extension<AppState>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let responses = viewer::visible(state.store.list().await, query.sort, query.filter);
    let csv = viewer::to_csv(&responses);
    let filename = viewer::export_filename(Utc::now().date_naive());

    (
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response()
}

/// Bulk-clear every stored response; answers the removed count
pub async fn clear_responses(Extension(state): Extension<AppState>) -> Json<Value> {
    let cleared = state.store.clear().await;
    tracing::info!(cleared, "Admin cleared the response collection");
    Json(json!({ "cleared": cleared }))
}
