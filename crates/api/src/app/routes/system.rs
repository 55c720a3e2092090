use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::app::dto::HealthResponse;
use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Json<HealthResponse> {
    let snapshot = services.store().snapshot().ok();
    Json(HealthResponse {
        status: "ok",
        loaded: snapshot.is_some(),
        generation: snapshot.as_ref().map(|s| s.generation()).unwrap_or(0),
        loaded_at: snapshot.as_ref().map(|s| s.loaded_at()),
    })
}
