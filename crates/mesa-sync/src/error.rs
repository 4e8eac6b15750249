//! # Sync Error Types

use thiserror::Error;

/// Subscription stream errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The subscriber fell behind and `skipped` events were dropped.
    /// The subscriber should requery the collections it displays.
    #[error("Subscription lagged, {skipped} events skipped")]
    Lagged { skipped: u64 },

    /// The hub was dropped; no further events will arrive.
    #[error("Change hub closed")]
    Closed,
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
