//! Macro definitions visible at a point in an include-graph traversal.

use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;

use flint_parse::{FileDirectives, IncludeKind, MacroValue, ParseError};

use crate::cache::DirectiveCache;

/// One macro source: a file whose definitions are visible from here.
///
/// Sources start `Deferred` when they come from a reused, already-analyzed
/// subtree; they are materialized through the directive cache only when a
/// lookup actually scans past them.
enum MacroSource {
    Collected(Rc<FileDirectives>),
    Deferred(PathBuf),
}

/// A macro include token expanded to a resolvable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedInclude {
    /// The path text the macro expanded to.
    pub path: String,
    /// Whether the expansion was a quoted or system form.
    pub kind: IncludeKind,
}

/// The macro definitions visible at the current point of one traversal.
///
/// Visibility is append-only and order-preserving within a traversal branch:
/// macros from files textually included earlier are visible to later
/// resolution attempts in the same branch. Lookups scan sources in append
/// order and the first matching definition wins; there is no backtracking across
/// ambiguous definitions.
#[derive(Default)]
pub struct MacroVisibilityLookup {
    sources: Vec<MacroSource>,
}

impl MacroVisibilityLookup {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-parsed file's directives as a visible source.
    pub fn append(&mut self, directives: Rc<FileDirectives>) {
        self.sources.push(MacroSource::Collected(directives));
    }

    /// Appends a file as a visible source without collecting its directives
    /// yet.
    ///
    /// The collection work happens only if a later macro lookup scans past
    /// this entry, so graphs with no macro includes pay nothing for it.
    pub fn append_deferred(&mut self, path: PathBuf) {
        self.sources.push(MacroSource::Deferred(path));
    }

    /// Expands a macro include token to a quoted/system path.
    ///
    /// Scans visible definitions in order, takes the first whose name
    /// matches, and follows `Reference` chains transitively (a reference
    /// cycle or a dangling reference is "unresolved"). Returns `None` when
    /// the token cannot be resolved, which is an expected outcome, not an error.
    pub fn expand(
        &mut self,
        name: &str,
        cache: &mut DirectiveCache<'_>,
    ) -> Result<Option<ExpandedInclude>, ParseError> {
        let mut seen = HashSet::new();
        let mut current = name.to_string();
        loop {
            if !seen.insert(current.clone()) {
                // Definition cycle, e.g. `#define A B` / `#define B A`.
                return Ok(None);
            }
            match self.find(&current, cache)? {
                Some(MacroValue::Quoted(path)) => {
                    return Ok(Some(ExpandedInclude {
                        path,
                        kind: IncludeKind::Quoted,
                    }));
                }
                Some(MacroValue::System(path)) => {
                    return Ok(Some(ExpandedInclude {
                        path,
                        kind: IncludeKind::System,
                    }));
                }
                Some(MacroValue::Reference(next)) => {
                    current = next;
                }
                Some(MacroValue::Unresolvable) | None => return Ok(None),
            }
        }
    }

    /// Finds the first visible definition of `name`, materializing deferred
    /// sources as the scan reaches them.
    fn find(
        &mut self,
        name: &str,
        cache: &mut DirectiveCache<'_>,
    ) -> Result<Option<MacroValue>, ParseError> {
        for source in &mut self.sources {
            let directives = match source {
                MacroSource::Collected(directives) => directives.clone(),
                MacroSource::Deferred(path) => {
                    let directives = cache.get(path)?;
                    *source = MacroSource::Collected(directives.clone());
                    directives
                }
            };
            if let Some(def) = directives.macro_named(name) {
                return Ok(Some(def.value.clone()));
            }
        }
        Ok(None)
    }
}
