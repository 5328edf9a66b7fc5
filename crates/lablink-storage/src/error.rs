//! Error types for storage backends.

/// Errors that can occur during storage operations.
///
/// Lookup misses are not errors: `find_*` operations return `Ok(None)`.
/// These variants cover backend failures and rejected writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A dependency of a write was gone by the time the write ran.
    #[error("Not found: {entity}/{id}")]
    NotFound {
        /// The kind of entity that was missing.
        entity: String,
        /// The identifier that did not resolve.
        id: String,
    },

    /// Attempted to insert an entity under an identifier that is taken.
    #[error("Already exists: {entity}/{id}")]
    Conflict { entity: String, id: String },

    /// The entity data was rejected by the backend.
    #[error("Invalid entity: {message}")]
    InvalidEntity { message: String },

    /// An internal backend failure.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a new `InvalidEntity` error.
    #[must_use]
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a `NotFound` error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a `Conflict` error.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
