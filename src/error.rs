//! Error types for the engagement engine

use thiserror::Error;

/// Errors surfaced by the engagement engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Durable store unavailable or unwritable. The in-memory session copy
    /// keeps any update that was applied before the write failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An award was requested for an ID missing from the static catalog.
    /// Cannot happen through the rule registry; guards direct misuse.
    #[error("unknown achievement id: {0}")]
    UnknownAchievement(String),
}

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;
