//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GrowboxError`] at the port boundary.

/// Boxed source error carried across crate boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by every port and service.
#[derive(Debug, thiserror::Error)]
pub enum GrowboxError {
    /// Caller input violated a domain invariant. Never retried.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Another writer holds the storage lock. Safe to retry.
    #[error("storage is busy")]
    Contention(#[source] BoxError),

    /// Contention persisted through the whole retry budget.
    #[error("storage unavailable after {attempts} attempts")]
    StoreUnavailable {
        attempts: u32,
        #[source]
        source: BoxError,
    },

    /// Any other storage failure.
    #[error("storage error")]
    Storage(#[source] BoxError),
}

impl GrowboxError {
    /// Whether the error is transient lock contention.
    #[must_use]
    pub fn is_contention(&self) -> bool {
        matches!(self, Self::Contention(_))
    }
}

/// Invariant violations detected while building domain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid state {0:?}, expected \"ON\" or \"OFF\"")]
    InvalidState(String),

    #[error("invalid mode {0:?}, expected \"manual\" or \"automatic\"")]
    InvalidMode(String),

    #[error("invalid time of day {0:?}, expected HH:MM:SS")]
    InvalidTimeOfDay(String),

    #[error("automatic mode requires both start_time and end_time")]
    IncompleteWindow,

    #[error("{field} must be a finite number")]
    NonFiniteReading { field: &'static str },

    #[error("humidity {0} is outside 0..=100")]
    HumidityOutOfRange(f64),
}

/// A lookup found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
}
