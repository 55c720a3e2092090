use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;

/// Reload the inventory.
///
/// A non-empty body is loaded as the new document; an empty body re-reads the
/// configured data file. On failure the current document stays in place.
pub async fn load_data(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let result = if body.iter().all(u8::is_ascii_whitespace) {
        services.load_data_file().await
    } else {
        services.load_bytes(&body)
    };

    match result {
        Ok(report) => (StatusCode::OK, Json(dto::LoadResponse::from(report))).into_response(),
        Err(e) => errors::load_error_to_response(e),
    }
}
