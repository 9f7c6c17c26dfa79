//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::rsvp::store::ResponseStore;
use crate::server::auth::SessionStore;
use crate::server::middleware::{require_admin, session_auth_middleware};
use crate::server::routes::{
    attendance_stats, clear_responses, existing_emails, export_responses, form_options,
    health_handler, list_responses, login, logout, save_responses, submit_rsvp,
};
use crate::server::static_files::serve_ui;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ResponseStore>,
    pub sessions: Arc<SessionStore>,
    pub admin_password: String,
}

/// Build the Axum application router
///
/// The caller constructs the store (the snapshot load happens there) and
/// injects it here next to a fresh session store.
pub fn build_app(store: Arc<ResponseStore>, config: &Config) -> Router {
    let app_state = AppState {
        store,
        sessions: Arc::new(SessionStore::new()),
        admin_password: config.admin_password.clone(),
    };

    // CORS configuration - allow any origin, matching the hosted save stub
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Admin API - everything except login sits behind require_admin
    let admin_routes = Router::new()
        .route("/responses", get(list_responses).delete(clear_responses))
        .route("/responses/export", get(export_responses))
        .route("/logout", post(logout))
        .layer(middleware::from_fn(require_admin))
        .route("/login", post(login));

    Router::new()
        // Public RSVP API
        .route("/api/rsvp", post(submit_rsvp))
        .route("/api/rsvp/emails", get(existing_emails))
        .route("/api/rsvp/options", get(form_options))
        .route("/api/rsvp/stats", get(attendance_stats))
        // Stand-in save endpoint, also the default mirror target
        .route("/api/save-responses", post(save_responses))
        .nest("/api/admin", admin_routes)
        // Health check
        .route("/health", get(health_handler))
        // Embedded form + admin pages
        .fallback(serve_ui)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(session_auth_middleware))
        .layer(Extension(app_state)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
