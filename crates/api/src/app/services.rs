use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use invdash_core::InventoryError;
use invdash_inventory::{InventoryStore, LoadReport};

use crate::config::{ApiConfig, DEFAULT_MAX_LOAD_BYTES};

/// Failure of a load request, from reading the source to installing it.
#[derive(Debug, Error)]
pub enum LoadDataError {
    #[error("data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Services shared by every handler.
#[derive(Debug)]
pub struct AppServices {
    store: Arc<InventoryStore>,
    data_path: PathBuf,
    max_load_bytes: usize,
}

impl AppServices {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_store(Arc::new(InventoryStore::new()), config.data_path.clone())
            .with_max_load_bytes(config.max_load_bytes)
    }

    pub fn with_store(store: Arc<InventoryStore>, data_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            data_path: data_path.into(),
            max_load_bytes: DEFAULT_MAX_LOAD_BYTES,
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Largest request body `POST /api/load-data` accepts.
    pub fn max_load_bytes(&self) -> usize {
        self.max_load_bytes
    }

    pub fn with_max_load_bytes(mut self, limit: usize) -> Self {
        self.max_load_bytes = limit;
        self
    }

    /// Load a document supplied directly (e.g. a request body).
    pub fn load_bytes(&self, raw: &[u8]) -> Result<LoadReport, LoadDataError> {
        Ok(self.store.load_document(raw)?)
    }

    /// Read the configured data file and load it.
    pub async fn load_data_file(&self) -> Result<LoadReport, LoadDataError> {
        let raw = match tokio::fs::read(&self.data_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadDataError::FileNotFound(self.data_path.clone()));
            }
            Err(source) => {
                return Err(LoadDataError::Io {
                    path: self.data_path.clone(),
                    source,
                });
            }
        };

        self.load_bytes(&raw)
    }

    /// Startup load: failures are logged and the server starts without data.
    pub async fn load_on_startup(&self) {
        match self.load_data_file().await {
            Ok(report) => tracing::info!(
                path = %self.data_path.display(),
                generation = report.generation,
                "loaded inventory at startup"
            ),
            Err(e) => tracing::warn!(
                path = %self.data_path.display(),
                error = %e,
                "no inventory loaded at startup; queries return 503 until a load succeeds"
            ),
        }
    }
}
