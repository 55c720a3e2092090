use std::collections::HashMap;

use chrono::{DateTime, Utc};

use invdash_core::{InventoryError, InventoryResult};

use crate::document::{BusinessUnit, InventoryDocument, Summary};
use crate::query::{BusinessUnitStats, SystemEntry, SystemFilter};

/// Immutable, fully-derived view of one loaded document.
///
/// Business unit statistics and the name index are computed once at build
/// time, so they always describe the document they are stored next to.
#[derive(Debug, Clone)]
pub struct Snapshot {
    generation: u64,
    loaded_at: DateTime<Utc>,
    document: InventoryDocument,
    stats: Vec<BusinessUnitStats>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub(crate) fn build(document: InventoryDocument, loaded_at: DateTime<Utc>) -> Self {
        let stats: Vec<BusinessUnitStats> = document
            .business_units
            .iter()
            .map(|(name, unit)| BusinessUnitStats::from_unit(name, unit))
            .collect();

        // Duplicate names cannot survive JSON object parsing; first wins otherwise.
        let mut index = HashMap::with_capacity(stats.len());
        for (pos, (name, _)) in document.business_units.iter().enumerate() {
            index.entry(name.to_string()).or_insert(pos);
        }

        Self {
            generation: 0,
            loaded_at,
            document,
            stats,
            index,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Load counter; 1 for the first successful load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn document(&self) -> &InventoryDocument {
        &self.document
    }

    pub fn summary(&self) -> &Summary {
        &self.document.summary
    }

    /// Business unit statistics in input order.
    pub fn business_units(&self) -> &[BusinessUnitStats] {
        &self.stats
    }

    /// Exact, case-sensitive lookup.
    pub fn business_unit(&self, name: &str) -> InventoryResult<&BusinessUnit> {
        self.index
            .get(name)
            .and_then(|&pos| self.document.business_units.get_index(pos))
            .map(|(_, unit)| unit)
            .ok_or_else(|| InventoryError::not_found(name))
    }

    /// Flatten every unit's systems (unit order, then system order).
    pub fn systems(&self, filter: SystemFilter) -> Vec<SystemEntry> {
        self.document
            .business_units
            .iter()
            .flat_map(|(name, unit)| {
                unit.systems
                    .iter()
                    .filter(move |system| filter.matches(system))
                    .map(move |system| SystemEntry {
                        business_unit: name.to_string(),
                        system: system.clone(),
                    })
            })
            .collect()
    }

    pub fn system_count(&self) -> usize {
        self.document.business_units.system_count()
    }
}
