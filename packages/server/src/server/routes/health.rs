use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    responses: usize,
    snapshot_path: String,
    data_dir_present: bool,
    snapshot_present: bool,
}

/// Health check endpoint
///
/// Reports the response count, data directory presence, and snapshot
/// presence. A fresh store has its directory but no snapshot yet; a store
/// whose directory could not be created has neither. Storage trouble
/// degrades persistence, not the service, so this always answers 200 once
/// the process is up.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let stats = state.store.stats().await;
    let snapshot_path = state.store.snapshot_path();
    let data_dir_present = match snapshot_path.parent() {
        Some(dir) => tokio::fs::try_exists(dir).await.unwrap_or(false),
        None => false,
    };
    let snapshot_present = tokio::fs::try_exists(snapshot_path).await.unwrap_or(false);

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            store: StoreHealth {
                responses: stats.total,
                snapshot_path: snapshot_path.display().to_string(),
                data_dir_present,
                snapshot_present,
            },
        }),
    )
}
