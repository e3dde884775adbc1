//! Error types of the inventory store.

use std::path::PathBuf;

use thiserror::Error;

use crate::product::ProductId;

/// Result type of the store's mutating operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Failure to read, create, or write the backing file.
#[derive(Debug, Error)]
#[error("failed to {action} '{}': {source}", .path.display())]
pub struct StoreIoError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl StoreIoError {
    pub(crate) fn new(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::PermissionDenied
    }
}

/// Outcome of a rejected or partially failed mutation.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// `add` with an id that is already present. Nothing changed.
    #[error("product id '{0}' already exists")]
    DuplicateId(ProductId),

    /// `add` with an id that is blank or has surrounding whitespace. Nothing changed.
    #[error("product id '{0}' is blank or has surrounding whitespace")]
    InvalidId(ProductId),

    /// `remove`/`update` of an id that is not present. Nothing changed.
    #[error("product '{0}' does not exist")]
    NotFound(ProductId),

    /// The mutation was applied in memory but rewriting the file failed.
    #[error("change kept in memory but not saved: {0}")]
    Persist(#[from] StoreIoError),
}

impl InventoryError {
    /// Whether the in-memory records were changed despite the error.
    pub fn applied(&self) -> bool {
        matches!(self, Self::Persist(_))
    }
}
