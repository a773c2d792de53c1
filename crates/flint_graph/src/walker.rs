//! The depth-first include-graph walker.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use flint_common::ContentHash;
use flint_parse::{IncludeDirectiveSource, IncludeKind};
use flint_resolve::{DirectiveCache, MacroVisibilityLookup, SearchPathResolver};
use flint_source::ContentSnapshot;
use flint_state::IncludeFileEdge;
use tracing::{debug, trace};

use crate::analysis::{FileAnalysis, IncludeFilePath, IncludeResolution};
use crate::error::WalkError;

/// Mutable state of one traversal, passed down the recursion.
///
/// Owned by a single `analyze` call; never shared across source files, so
/// independent passes stay safe to run concurrently.
struct Traversal {
    /// Hashes of the files on the current DFS path, for cycle detection.
    visited: Vec<ContentHash>,
    /// Macro definitions visible at the current point of the branch.
    macros: MacroVisibilityLookup,
}

/// Builds the flattened include graph of source files, one at a time.
///
/// The walker owns the pass-scoped resolver, directive cache, and analysis
/// memo arena. All three record filesystem facts that are only valid for one
/// planning pass; the walker must not outlive it.
pub struct IncludeGraphWalker<'a> {
    resolver: SearchPathResolver<'a>,
    directives: DirectiveCache<'a>,
    /// Memoized macro-independent analyses, keyed by file path.
    analyses: HashMap<PathBuf, Rc<FileAnalysis>>,
    ignore_unresolved: bool,
}

impl<'a> IncludeGraphWalker<'a> {
    /// Creates a walker for one planning pass.
    ///
    /// `ignore_unresolved` suppresses the escalation of failed macro
    /// expansions to the unresolved severity (the expert override; the
    /// conservative default is `false`).
    pub fn new(
        snapshot: &'a dyn ContentSnapshot,
        directive_source: &'a dyn IncludeDirectiveSource,
        include_roots: Vec<PathBuf>,
        ignore_unresolved: bool,
    ) -> Self {
        Self {
            resolver: SearchPathResolver::new(snapshot, include_roots),
            directives: DirectiveCache::new(directive_source),
            analyses: HashMap::new(),
            ignore_unresolved,
        }
    }

    /// The pass-scoped resolver, shared with edge replay so repeated header
    /// lookups across the whole pass cost one filesystem probe each.
    pub fn resolver_mut(&mut self) -> &mut SearchPathResolver<'a> {
        &mut self.resolver
    }

    /// Analyzes one source file's transitive include graph.
    ///
    /// `hash` is the file's current content hash, already computed by the
    /// caller for its own change comparison.
    pub fn analyze(&mut self, path: &Path, hash: ContentHash) -> Result<FileAnalysis, WalkError> {
        let mut traversal = Traversal {
            visited: Vec::new(),
            macros: MacroVisibilityLookup::new(),
        };
        let analysis = self.visit(&mut traversal, path, hash, true)?;
        trace!(
            file = %path.display(),
            edges = analysis.edges().len(),
            resolution = ?analysis.resolution(),
            "analyzed include graph"
        );
        Ok(Rc::try_unwrap(analysis).unwrap_or_else(|rc| (*rc).clone()))
    }

    /// Visits one file of the graph.
    ///
    /// Returns the file's flattened subtree analysis. Header analyses
    /// (`is_root == false`) are memoized when macro-independent; a root's
    /// direct edges carry no includer hash, so roots bypass the arena in
    /// both directions.
    fn visit(
        &mut self,
        traversal: &mut Traversal,
        path: &Path,
        hash: ContentHash,
        is_root: bool,
    ) -> Result<Rc<FileAnalysis>, WalkError> {
        if !is_root {
            if let Some(cached) = self.analyses.get(path) {
                let cached = cached.clone();
                // The reused subtree's macro definitions must stay visible
                // to later resolution attempts in this branch, but parsing
                // them again can wait until a macro include actually looks.
                traversal.macros.append_deferred(path.to_path_buf());
                for file in cached.include_files() {
                    traversal.macros.append_deferred(file.path.clone());
                }
                trace!(file = %path.display(), "reusing macro-independent analysis");
                return Ok(cached);
            }
        }

        if traversal.visited.contains(&hash) {
            // Include cycle: treat the recurrence as a leaf. The file's full
            // expansion already happened (or is happening) further up the
            // path, so nothing is lost.
            return Ok(Rc::new(FileAnalysis::new()));
        }
        traversal.visited.push(hash);

        let directives = self.directives.get(path)?;
        traversal.macros.append(directives.clone());

        let mut analysis = FileAnalysis::new();
        let source_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let edge_source = (!is_root).then_some(hash);

        for token in &directives.includes {
            let (value, kind) = match token.kind {
                IncludeKind::Quoted | IncludeKind::System => (token.value.clone(), token.kind),
                IncludeKind::Macro => {
                    match traversal.macros.expand(&token.value, &mut self.directives)? {
                        Some(expanded) => {
                            analysis.escalate(IncludeResolution::MacroIncludesResolved);
                            (expanded.path, expanded.kind)
                        }
                        None => {
                            if self.ignore_unresolved {
                                debug!(
                                    file = %path.display(),
                                    token = token.value.as_str(),
                                    "ignoring unresolved macro include"
                                );
                                analysis.escalate(IncludeResolution::MacroIncludesResolved);
                            } else {
                                debug!(
                                    file = %path.display(),
                                    token = token.value.as_str(),
                                    "macro include did not resolve"
                                );
                                analysis.escalate(IncludeResolution::UnresolvedMacroIncludes);
                            }
                            continue;
                        }
                    }
                }
            };

            let resolved = self.resolver.resolve(&value, kind, &source_dir)?;
            analysis.push_edge(IncludeFileEdge {
                include_path: value,
                kind,
                included_by: edge_source,
                resolved_to: resolved.hash,
            });

            if let (Some(target_path), Some(target_hash)) = (resolved.path, resolved.hash) {
                analysis.push_include_file(IncludeFilePath {
                    path: target_path.clone(),
                    hash: target_hash,
                });
                let child = self.visit(traversal, &target_path, target_hash, false)?;
                analysis.merge(&child);
            }
        }

        traversal.visited.pop();

        let analysis = Rc::new(analysis);
        if !is_root && analysis.resolution() == IncludeResolution::NoMacroIncludes {
            self.analyses.insert(path.to_path_buf(), analysis.clone());
        }
        Ok(analysis)
    }
}
