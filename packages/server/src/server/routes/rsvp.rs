//! Public RSVP routes: submission, registered emails, form options, stats

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::domains::rsvp::collector::{self, RsvpForm};
use crate::domains::rsvp::models::unit::{Floor, Tower, Wing};
use crate::domains::rsvp::store::AttendanceStats;
use crate::server::app::AppState;

/// Handle a form submission end to end: validate, normalize, insert
///
/// Field failures answer 422 with one message per field. A duplicate email
/// that slips past validation (two submissions racing) answers 409 from the
/// store's own check. Success answers 201 with the stored record.
pub async fn submit_rsvp(
    Extension(state): Extension<AppState>,
    Json(form): Json<RsvpForm>,
) -> Response {
    let existing = state.store.existing_emails().await;
    let submission = match collector::validate(&form, &existing) {
        Ok(submission) => submission,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response();
        }
    };

    match state.store.add(submission).await {
        Ok(response) => {
            tracing::info!(
                flat = %response.full_flat_number,
                attendance = %response.attendance,
                "Recorded RSVP"
            );
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => (
            StatusCode::CONFLICT,
            Json(json!({ "errors": { "email": err.to_string() } })),
        )
            .into_response(),
    }
}

/// Registered emails, lower-cased, for the form's duplicate pre-check
pub async fn existing_emails(Extension(state): Extension<AppState>) -> Json<Value> {
    let mut emails: Vec<String> = state.store.existing_emails().await.into_iter().collect();
    emails.sort();
    Json(json!({ "emails": emails }))
}

/// Select options for the form page: towers, wings, and floors with their
/// flat counts
pub async fn form_options() -> Json<Value> {
    let floors: Vec<Value> = Floor::all()
        .map(|floor| {
            json!({
                "value": floor.to_string(),
                "label": match floor {
                    Floor::Ground => "Ground".to_string(),
                    level => format!("Floor {}", level),
                },
                "flats": floor.flat_count(),
            })
        })
        .collect();

    Json(json!({
        "towers": Tower::ALL.iter().map(Tower::as_str).collect::<Vec<_>>(),
        "wings": Wing::ALL.iter().map(Wing::as_str).collect::<Vec<_>>(),
        "floors": floors,
    }))
}

/// Attendance tally for the form page's counter strip
pub async fn attendance_stats(Extension(state): Extension<AppState>) -> Json<AttendanceStats> {
    Json(state.store.stats().await)
}
