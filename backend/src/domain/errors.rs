//! Error taxonomy for the inventory domain.
//!
//! Every variant is local, synchronous and non-retryable: the operation
//! failed as a whole and the persisted store was left untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad input: zero quantity, missing required field, capacity below the
    /// on-loan count.
    #[error("{0}")]
    Validation(String),

    /// Unknown component or issue ID.
    #[error("{0}")]
    NotFound(String),

    /// Requested more units than the component has on the shelf.
    #[error("requested {requested} units but only {available} available")]
    InsufficientStock { requested: u32, available: u32 },

    /// Delete attempted while stock is out on loan.
    #[error("{0}")]
    Conflict(String),

    /// Return attempted on an already-returned issue.
    #[error("{0}")]
    InvalidState(String),

    /// The store contradicts an invariant the services maintain (e.g. an
    /// issued record referencing a component missing from the registry).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The backing store failed to load or commit.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        DomainError::InvalidState(message.into())
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        DomainError::InvariantViolation(message.into())
    }
}
