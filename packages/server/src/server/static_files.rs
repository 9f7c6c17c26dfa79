use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Form and admin pages embedded at compile time
#[derive(RustEmbed)]
#[folder = "static"]
pub struct UiAssets;

/// Serve the embedded UI
///
/// `/` is the RSVP form and `/admin` the admin panel; everything else maps
/// straight onto the embedded files. No SPA fallback: there is no
/// client-side routing, so an unknown path is honestly a 404.
pub async fn serve_ui(uri: Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        "admin" => "admin.html",
        other => other,
    };

    match UiAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
