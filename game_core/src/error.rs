//! Errors raised by the session aggregate and its entities.

use thiserror::Error;

/// Failure of a domain operation. The aggregate state is unchanged whenever one is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// An id or username was empty or whitespace only
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    /// A speed, length or score limit was zero, negative or NaN
    #[error("{field} must be strictly positive")]
    NonPositive { field: &'static str },

    #[error("session is full: {max} players already joined")]
    CapacityExceeded { max: usize },

    #[error("player already joined: {0}")]
    DuplicatePlayer(String),

    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("ball not found: {0}")]
    BallNotFound(String),

    /// Scoring needs both players seated
    #[error("session is not active")]
    SessionNotActive,

    #[error("session is finished")]
    SessionFinished,
}

/// Reject empty or whitespace-only identifiers.
pub(crate) fn require_non_blank(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Blank { field });
    }
    Ok(())
}

/// Reject zero, negative and NaN values.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn require_positive(value: f32, field: &'static str) -> Result<(), DomainError> {
    // `!(x > 0)` also catches NaN
    if !(value > 0.0) {
        return Err(DomainError::NonPositive { field });
    }
    Ok(())
}
