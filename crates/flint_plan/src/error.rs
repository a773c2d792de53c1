//! Error types for planning.

use std::path::PathBuf;

use flint_graph::WalkError;
use flint_source::SnapshotError;
use flint_state::StateError;

/// Errors that abort one compile task's planning pass.
///
/// Per the error-handling policy, everything recoverable (missing headers,
/// unresolved macros, cycles, stale caches) is folded into the plan as
/// data; only genuine I/O failures and orchestration bugs surface here.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A source file in the current input list does not exist.
    #[error("source file {path} does not exist")]
    MissingSource {
        /// The missing source file.
        path: PathBuf,
    },

    /// An I/O error occurred while scanning include roots.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being scanned.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Include-graph analysis failed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// A filesystem snapshot query failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Persisting the new compilation state failed.
    #[error(transparent)]
    State(#[from] StateError),
}
