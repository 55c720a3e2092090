//! Inventory aggregation and query layer.
//!
//! Loads the JSON inventory export, validates its shape, and answers summary,
//! business-unit and system queries against an atomically swappable snapshot
//! (no IO, no HTTP).

pub mod document;
pub mod query;
pub mod snapshot;
pub mod store;

pub use document::{BusinessUnit, BusinessUnits, InventoryDocument, Summary, System};
pub use query::{BusinessUnitStats, SystemEntry, SystemFilter, UnknownFilter};
pub use snapshot::Snapshot;
pub use store::{InventoryStore, LoadReport};
