//! Error types for snapshot queries.

use std::path::PathBuf;

/// Errors raised while observing the filesystem.
///
/// A missing file is not an error (snapshots answer `None` for it); this
/// type covers genuine I/O failures such as permission problems, which must
/// propagate rather than be masked as "absent", since masking them risks silently
/// wrong incremental decisions.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// An I/O error occurred while reading a file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
