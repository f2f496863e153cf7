//! Error types
//!
//! `StoreError` covers the recoverable, learner-facing failures of tree mutations.
//! `ApiError` covers everything a caller of the library can run into outside of them.

use crate::types::NodeId;
use thiserror::Error;

/// Failure of a Node Store operation.
///
/// None of these are fatal: the store is left unchanged and the session turns them into
/// transient feedback (or ignores them, for `InvalidTarget`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("An item named \"{name}\" already exists here")]
    NameCollision { name: String },

    #[error("Cannot move a folder into one of its own subfolders")]
    CyclicMove,

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}

impl StoreError {
    /// Whether the learner should be told about this failure.
    ///
    /// Redundant actions (dropping a node onto its current parent, onto itself, onto a file)
    /// are not invalid states and stay silent.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, StoreError::InvalidTarget(_) | StoreError::NodeNotFound(_))
    }
}

/// Library-level error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid level catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid node snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("No async runtime available: {0}")]
    RuntimeUnavailable(String),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
