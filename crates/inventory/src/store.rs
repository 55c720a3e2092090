use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use serde::Serialize;

use invdash_core::{InventoryError, InventoryResult};

use crate::document::{BusinessUnit, InventoryDocument, Summary};
use crate::query::{BusinessUnitStats, SystemEntry, SystemFilter};
use crate::snapshot::Snapshot;

/// Outcome of a successful [`InventoryStore::load_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub generation: u64,
    pub business_units: usize,
    pub systems: usize,
}

/// In-memory holder of the current inventory document.
///
/// Readers clone an `Arc<Snapshot>` under a short shared lock and query it
/// without holding any lock. A reload builds the new snapshot off to the side
/// and only takes the write lock for the pointer swap, so readers see either
/// the old document or the new one in full.
#[derive(Debug, Default)]
pub struct InventoryStore {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot; use it to run several queries against one document.
    pub fn snapshot(&self) -> InventoryResult<Arc<Snapshot>> {
        // The guarded value is a single pointer, so a poisoned lock still holds
        // a complete snapshot.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(InventoryError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_ok()
    }

    /// Generation of the current snapshot, 0 when nothing is loaded.
    pub fn generation(&self) -> u64 {
        self.snapshot().map(|s| s.generation()).unwrap_or(0)
    }

    /// Parse, validate and atomically install a new document.
    ///
    /// On failure the previously loaded document stays in place.
    pub fn load_document(&self, raw: &[u8]) -> InventoryResult<LoadReport> {
        let document = match InventoryDocument::parse(raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, bytes = raw.len(), "rejected inventory document");
                return Err(e);
            }
        };

        let prepared = Snapshot::build(document, Utc::now());

        let report = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let generation = current.as_ref().map(|s| s.generation()).unwrap_or(0) + 1;
            let snapshot = Arc::new(prepared.with_generation(generation));
            let report = LoadReport {
                generation,
                business_units: snapshot.business_units().len(),
                systems: snapshot.system_count(),
            };
            *current = Some(snapshot);
            report
        };

        tracing::info!(
            generation = report.generation,
            business_units = report.business_units,
            systems = report.systems,
            "inventory document loaded"
        );

        Ok(report)
    }

    pub fn summary(&self) -> InventoryResult<Summary> {
        Ok(self.snapshot()?.summary().clone())
    }

    /// Business unit statistics in input order.
    pub fn list_business_units(&self) -> InventoryResult<Vec<BusinessUnitStats>> {
        Ok(self.snapshot()?.business_units().to_vec())
    }

    pub fn business_unit(&self, name: &str) -> InventoryResult<BusinessUnit> {
        self.snapshot()?.business_unit(name).cloned()
    }

    pub fn list_systems(&self, filter: SystemFilter) -> InventoryResult<Vec<SystemEntry>> {
        Ok(self.snapshot()?.systems(filter))
    }
}
