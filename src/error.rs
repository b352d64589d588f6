//! Error types for snapshot construction.

use thiserror::Error;

/// Main error type for snapshot builder operations.
///
/// Every variant is a caller-side violation of the snapshot's uniqueness or
/// referential invariants and is surfaced immediately. A failed builder call
/// leaves the input snapshot untouched; there is no partial application.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Section already exists: {0}")]
    DuplicateSection(String),

    #[error("Section not found: {0}")]
    UnknownSection(String),

    #[error("Item identity already exists: {0}")]
    DuplicateIdentity(String),
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;
