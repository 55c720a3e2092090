use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

pub mod inventory;
pub mod load;
pub mod system;

/// Router for the `/api` endpoints.
///
/// `max_load_bytes` replaces axum's default body limit on the load route only.
pub fn router(max_load_bytes: usize) -> Router {
    Router::new()
        .route("/summary", get(inventory::get_summary))
        .route("/business-units", get(inventory::list_business_units))
        .route("/business-units/:name", get(inventory::get_business_unit))
        .route("/systems", get(inventory::list_systems))
        .route("/systems/issues", get(inventory::list_systems_with_issues))
        .route(
            "/load-data",
            post(load::load_data).layer(DefaultBodyLimit::max(max_load_bytes)),
        )
}
