//! `invdash-core` — shared building blocks for the inventory dashboard.
//!
//! This crate holds the error taxonomy every other layer speaks
//! (no IO, no HTTP, no storage).

pub mod error;

pub use error::{InventoryError, InventoryResult};
