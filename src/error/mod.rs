//! Unified error type for store operations.
use crate::entity::EntityKind;
use thiserror::Error;

/// Errors raised by the storage port, the entity caches and the trash.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Cached '{key}' could not be parsed: {source}")]
    CorruptCache {
        key: String,
        source: serde_json::Error,
    },
    #[error("The {kind} '{id}' is protected and cannot be deleted")]
    ProtectedEntity { kind: EntityKind, id: String },
    #[error("The {kind} '{id}' is not in the trash")]
    NotDeleted { kind: EntityKind, id: String },
    #[error("No trash source registered for kind '{0}'")]
    UnknownKind(EntityKind),
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    /// Message suitable for showing to an editor.
    ///
    /// Protected-entity violations get the wording the dashboard uses; every
    /// other error falls back to its display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StoreError::ProtectedEntity {
                kind: EntityKind::Page,
                ..
            } => "The home page cannot be deleted.".to_string(),
            other => other.to_string(),
        }
    }

    /// Whether this error came from a cache whose stored JSON is unreadable.
    #[must_use]
    pub fn is_corrupt_cache(&self) -> bool {
        matches!(self, StoreError::CorruptCache { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
