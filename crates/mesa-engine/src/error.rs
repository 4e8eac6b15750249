//! # Engine Error Type
//!
//! What the dashboards see. Wraps the domain and persistence error
//! classes and adds role gating.
//!
//! Propagation policy: primary mutations (reservation create, status
//! transition, checkout commit) fail with one of these and leave no
//! partial state. Secondary point effects fail independently and ride
//! back on the operation's outcome struct as a warning instead.

use thiserror::Error;

use mesa_core::{CoreError, Role};
use mesa_db::DbError;

/// Engine operation errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Business rule or lookup failure (caller-recoverable).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence substrate failure (retryable by the caller).
    #[error(transparent)]
    Db(#[from] DbError),

    /// The acting role may not perform this operation.
    #[error("{role:?} role may not {action}")]
    Forbidden { role: Role, action: &'static str },
}

impl EngineError {
    /// True when resubmitting the same request cannot succeed without a
    /// state change (terminal reservation, missing record).
    pub fn is_terminal_rejection(&self) -> bool {
        matches!(
            self,
            EngineError::Core(CoreError::InvalidTransition { .. }) | EngineError::Forbidden { .. }
        )
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
