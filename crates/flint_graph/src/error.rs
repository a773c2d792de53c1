//! Error types for include-graph analysis.

use flint_parse::ParseError;
use flint_source::SnapshotError;

/// Errors that abort the analysis of one source file.
///
/// Missing headers, unresolved macros, and cycles are all resolved locally
/// into analysis data and never surface here; only genuine I/O failures
/// from the collaborators do.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// Directive parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A filesystem snapshot query failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
