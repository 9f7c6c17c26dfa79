//! The stand-in save endpoint
//!
//! Accepts the serialized response collection and discards it after a shape
//! check. The snapshot file remains the durable copy; this endpoint exists
//! so a mirror push configured with MIRROR_URL has somewhere well-formed to
//! land, and so the API surface matches the original hosted stub.

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Accept a JSON array of responses and acknowledge without storing
pub async fn save_responses(Json(payload): Json<Value>) -> (StatusCode, Json<Value>) {
    let responses = match payload.as_array() {
        Some(responses) => responses,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid data format" })),
            );
        }
    };

    tracing::debug!(count = responses.len(), "Accepted save-responses payload");
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Responses saved successfully" })),
    )
}
