//! The boundary trait for obtaining a file's parsed directives.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::directives::FileDirectives;
use crate::error::ParseError;

/// Parses a file's raw include/import/macro-include directives.
///
/// Implementations are pure functions of file content: parsing the same
/// file twice during one pass must yield equal results. The planner memoizes
/// calls per pass, so implementations need no cache of their own.
pub trait IncludeDirectiveSource {
    /// Parses the directives of `path`.
    fn parse(&self, path: &Path) -> Result<FileDirectives, ParseError>;
}

/// [`IncludeDirectiveSource`] backed by a registered map (useful for tests
/// and embedders that parse up front).
///
/// Files with no registered entry parse as an empty directive set, matching
/// the common case of headers that include nothing.
#[derive(Debug, Default)]
pub struct MemoryDirectiveSource {
    files: HashMap<PathBuf, FileDirectives>,
}

impl MemoryDirectiveSource {
    /// Creates an empty directive source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the directives of `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, directives: FileDirectives) {
        self.files.insert(path.into(), directives);
    }
}

impl IncludeDirectiveSource for MemoryDirectiveSource {
    fn parse(&self, path: &Path) -> Result<FileDirectives, ParseError> {
        Ok(self.files.get(path).cloned().unwrap_or_default())
    }
}
