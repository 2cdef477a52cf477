//! Error types for the orchestration layer.

use thiserror::Error;

/// Result type for engine flows.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure raised by a caller-supplied operation or hook.
///
/// Operations run arbitrary caller code (network calls, store writes),
/// so the engine treats their failures as opaque messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct OperationError(String);

impl OperationError {
    /// Creates an operation error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<String> for OperationError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for OperationError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Errors that can occur in engine flows.
///
/// Every bracketed flow reports its failure twice with the same value:
/// once through `UiHooks::set_error` and once as the returned `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No operation registered under this name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The section declares no update operation.
    #[error("section has no update operation")]
    NoUpdateOperation,

    /// The bulk patch names an entity key the entity map lacks.
    #[error("no entity under key: {0}")]
    MissingEntity(String),

    /// A fetch operation failed.
    #[error("fetch operation '{name}' failed: {source}")]
    Fetch {
        /// Name the operation was registered under.
        name: String,
        /// The operation's failure.
        source: OperationError,
    },

    /// An update operation failed.
    #[error("update operation '{name}' failed: {source}")]
    Update {
        /// Name the operation was registered under.
        name: String,
        /// The operation's failure.
        source: OperationError,
    },

    /// The `update_field` hook failed during a bulk update.
    #[error("field update for '{key}' failed: {source}")]
    FieldUpdate {
        /// Entity key being updated when the hook failed.
        key: String,
        /// The hook's failure.
        source: OperationError,
    },
}
