//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input to the renderer or the remover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid node <{tag}>: {reason}")]
    InvalidNode { tag: String, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
