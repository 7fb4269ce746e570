//! Error types for the tombola session core.
//!
//! Nothing here is fatal. Malformed persistence input is treated as absent
//! by the reconciler; win catalog errors are handed back to the caller as a
//! rejection of the triggering input.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The `state` URL parameter could not be decoded.
    #[error("malformed state token: {0}")]
    MalformedToken(String),

    /// The stored blob could not be decoded.
    #[error("malformed stored state: {0}")]
    MalformedBlob(String),

    /// A win with this label is already in the catalog.
    #[error("this win already exists: {0}")]
    DuplicateWin(String),

    /// The win label is empty after trimming.
    #[error("please enter a win name")]
    EmptyWinLabel,

    /// Predefined wins are permanent.
    #[error("predefined win cannot be deleted: {0}")]
    PredefinedWinDeletionRejected(String),

    /// Runtime configuration JSON was rejected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
