use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use invdash_inventory::SystemFilter;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn get_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().summary() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

/// Business unit statistics, in the order the units appear in the data file.
pub async fn list_business_units(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().list_business_units() {
        Ok(units) => (StatusCode::OK, Json(units)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn get_business_unit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.store().business_unit(&name) {
        Ok(unit) => (StatusCode::OK, Json(unit)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn list_systems(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SystemsQuery>,
) -> axum::response::Response {
    let filter = match query.filter.as_deref() {
        None | Some("") => SystemFilter::All,
        Some(raw) => match raw.parse() {
            Ok(f) => f,
            Err(e) => return errors::filter_error_to_response(e),
        },
    };

    systems_response(&services, filter)
}

pub async fn list_systems_with_issues(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    systems_response(&services, SystemFilter::WithIssues)
}

fn systems_response(services: &AppServices, filter: SystemFilter) -> axum::response::Response {
    match services.store().list_systems(filter) {
        Ok(systems) => (StatusCode::OK, Json(systems)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
