//! Error types for the directive parsing boundary.

use std::path::PathBuf;

/// Errors raised by an [`IncludeDirectiveSource`](crate::IncludeDirectiveSource).
///
/// Unparseable *directives* are not errors; the parser degrades them to
/// unresolvable values. This type covers failures to obtain the directives
/// at all, which abort analysis of the owning compile task.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// An I/O error occurred while reading the source file.
    #[error("could not extract includes from {path}: {source}")]
    Io {
        /// The source file being parsed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The source file could not be processed.
    #[error("could not extract includes from {path}: {reason}")]
    Invalid {
        /// The source file being parsed.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display_names_file() {
        let err = ParseError::Io {
            path: PathBuf::from("src/a.c"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("src/a.c"));
    }

    #[test]
    fn invalid_display_names_reason() {
        let err = ParseError::Invalid {
            path: PathBuf::from("src/a.c"),
            reason: "embedded NUL".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a.c"));
        assert!(msg.contains("embedded NUL"));
    }
}
