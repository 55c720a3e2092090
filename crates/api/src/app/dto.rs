use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invdash_inventory::LoadReport;

// -------------------------
// Request DTOs
// -------------------------

/// `GET /api/systems?filter=...`
#[derive(Debug, Default, Deserialize)]
pub struct SystemsQuery {
    pub filter: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub report: LoadReport,
}

impl From<LoadReport> for LoadResponse {
    fn from(report: LoadReport) -> Self {
        Self {
            message: "Data loaded successfully",
            report,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub loaded: bool,
    pub generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}
