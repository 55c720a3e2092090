//! Inventory error model.

use thiserror::Error;

/// Result type used across the inventory layers.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-level error.
///
/// Only three kinds exist; callers map them to their own transport
/// (e.g. HTTP status codes) without local recovery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A query arrived before any document was loaded.
    #[error("inventory data not loaded")]
    NotLoaded,

    /// No business unit with the requested name exists.
    #[error("business unit not found: {0}")]
    NotFound(String),

    /// The raw document failed structural validation.
    #[error("malformed inventory document: {0}")]
    MalformedInput(String),
}

impl InventoryError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}
