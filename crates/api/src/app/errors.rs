use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use invdash_core::InventoryError;
use invdash_inventory::UnknownFilter;

use crate::app::services::LoadDataError;

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    match err {
        InventoryError::NotLoaded => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "data_unavailable",
            "inventory data not loaded; please load data",
        ),
        InventoryError::NotFound(name) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Business unit not found: {name}"),
        ),
        InventoryError::MalformedInput(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "malformed_input", msg)
        }
    }
}

pub fn load_error_to_response(err: LoadDataError) -> axum::response::Response {
    match err {
        LoadDataError::FileNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "data_file_not_found", err.to_string())
        }
        LoadDataError::Io { .. } => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "io_error", err.to_string())
        }
        LoadDataError::Inventory(e) => inventory_error_to_response(e),
    }
}

pub fn filter_error_to_response(err: UnknownFilter) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_filter", err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
