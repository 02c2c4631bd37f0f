//! Storage-layer failures.
//!
//! A `StorageError` is deliberately just a description. The presenter
//! classifies it by the markers that description contains, so adapters
//! must phrase their failures with the prefixes produced by
//! [`crate::infra::db_errors::map_db_err`].

use thiserror::Error;

pub const NOT_FOUND_MARKER: &str = "record not found";
pub const DUPLICATE_MARKER: &str = "duplicate";
pub const UNIQUE_MARKER: &str = "unique constraint";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct StorageError {
    description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    NotFound,
    Duplicate,
    Other,
}

impl StorageError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(format!("{NOT_FOUND_MARKER}: {entity}"))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Case-sensitive substring classification of the description.
    pub fn kind(&self) -> StorageErrorKind {
        let d = self.description.as_str();
        if d.contains(NOT_FOUND_MARKER) {
            StorageErrorKind::NotFound
        } else if d.contains(DUPLICATE_MARKER) || d.contains(UNIQUE_MARKER) {
            StorageErrorKind::Duplicate
        } else {
            StorageErrorKind::Other
        }
    }
}
