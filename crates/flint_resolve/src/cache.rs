//! Pass-scoped memoization of directive parsing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use flint_parse::{FileDirectives, IncludeDirectiveSource, ParseError};

/// Memoizes [`IncludeDirectiveSource::parse`] results for one planning pass.
///
/// Many source files share headers; each header is parsed at most once per
/// pass. Results are shared via `Rc` between the graph walker and the macro
/// visibility lookup.
pub struct DirectiveCache<'a> {
    source: &'a dyn IncludeDirectiveSource,
    parsed: HashMap<PathBuf, Rc<FileDirectives>>,
}

impl<'a> DirectiveCache<'a> {
    /// Creates an empty cache over the given directive source.
    pub fn new(source: &'a dyn IncludeDirectiveSource) -> Self {
        Self {
            source,
            parsed: HashMap::new(),
        }
    }

    /// Returns the directives of `path`, parsing on first request.
    pub fn get(&mut self, path: &Path) -> Result<Rc<FileDirectives>, ParseError> {
        if let Some(directives) = self.parsed.get(path) {
            return Ok(directives.clone());
        }
        let directives = Rc::new(self.source.parse(path)?);
        self.parsed
            .insert(path.to_path_buf(), directives.clone());
        Ok(directives)
    }
}
