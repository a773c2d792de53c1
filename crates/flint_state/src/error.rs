//! Error types for state persistence.

use std::path::PathBuf;

/// Errors that can occur while persisting compilation state.
///
/// Loads are fail-safe (`Option`, never `Err`); this type covers the write
/// path and genuine store I/O failures.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// An I/O error occurred while reading or writing a store entry.
    #[error("state store I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A serialization error occurred while encoding a state.
    #[error("state serialization error: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },
}
