//! The per-pass planning state machine.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use flint_common::ContentHash;
use flint_graph::IncludeGraphWalker;
use flint_parse::IncludeDirectiveSource;
use flint_source::ContentSnapshot;
use flint_state::{
    CompilationStateBuilder, CompilationStateStore, ObjectStore, SourceFileState,
};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::plan::CompilationPlan;

/// Terminal states of the per-source state machine.
///
/// Every source file starts a pass unvisited and ends in exactly one of
/// these. A `Reused` file with unresolved macro includes is still *reported*
/// for recompilation (unless the override is active); the distinction is
/// about whether its recorded analysis was carried forward or rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileStatus {
    Reused,
    Recompiled,
}

/// Plans incremental recompilation for one compile task at a time.
///
/// The planner owns nothing across passes: each [`plan`](Self::plan) call
/// creates its own walker, resolver cache, and state builder, so independent
/// compile tasks may run planners concurrently as long as they use distinct
/// unit keys.
pub struct IncrementalCompilationPlanner<'a> {
    config: PlannerConfig,
    snapshot: &'a dyn ContentSnapshot,
    directive_source: &'a dyn IncludeDirectiveSource,
}

impl<'a> IncrementalCompilationPlanner<'a> {
    /// Creates a planner over the given collaborators.
    pub fn new(
        config: PlannerConfig,
        snapshot: &'a dyn ContentSnapshot,
        directive_source: &'a dyn IncludeDirectiveSource,
    ) -> Self {
        Self {
            config,
            snapshot,
            directive_source,
        }
    }

    /// Runs one planning pass for the compile task identified by `unit_key`.
    ///
    /// `sources` is the full current source-file list. The previous state is
    /// loaded from the store (a missing or stale entry means "analyze
    /// everything"), each source is reused or re-analyzed, and the new state
    /// is persisted once, at the end of the pass.
    pub fn plan<S: ObjectStore>(
        &self,
        unit_key: &str,
        sources: &[PathBuf],
        store: &mut CompilationStateStore<S>,
    ) -> Result<CompilationPlan, PlanError> {
        let previous = store.load(unit_key).unwrap_or_default();
        let mut walker = IncludeGraphWalker::new(
            self.snapshot,
            self.directive_source,
            self.config.include_roots.clone(),
            self.config.ignore_unresolved_headers,
        );

        let mut builder = CompilationStateBuilder::new();
        let mut recompile = Vec::new();
        let mut reused = 0usize;
        let mut existing_headers = BTreeSet::new();
        let mut unresolved_headers = false;

        for source in sources {
            builder.add_source_input(source.clone());
            let current_hash =
                self.snapshot
                    .hash_of(source)?
                    .ok_or_else(|| PlanError::MissingSource {
                        path: source.clone(),
                    })?;

            let carried: Option<SourceFileState> = match previous.file_state(source) {
                Some(prev) if prev.hash == current_hash => {
                    match self.replay_edges(source, prev, &mut walker)? {
                        Some(targets) => {
                            existing_headers.extend(targets);
                            Some(prev.clone())
                        }
                        None => {
                            debug!(file = %source.display(), "include graph changed");
                            None
                        }
                    }
                }
                Some(_) => {
                    debug!(file = %source.display(), "source content changed");
                    None
                }
                None => {
                    debug!(file = %source.display(), "new source file");
                    None
                }
            };

            let (state, status) = match carried {
                Some(state) => (state, FileStatus::Reused),
                None => {
                    let analysis = walker.analyze(source, current_hash)?;
                    for file in analysis.include_files() {
                        existing_headers.insert(file.path.clone());
                    }
                    let has_unresolved = analysis.has_unresolved();
                    let state = SourceFileState {
                        hash: current_hash,
                        has_unresolved_includes: has_unresolved,
                        edges: analysis.into_edges(),
                    };
                    (state, FileStatus::Recompiled)
                }
            };

            unresolved_headers |= state.has_unresolved_includes;

            // An unresolved macro include might resolve differently after an
            // unrelated change elsewhere, so such files cannot be trusted as
            // stable without the explicit override.
            let conservative_rebuild = status == FileStatus::Reused
                && state.has_unresolved_includes
                && !self.config.ignore_unresolved_headers;

            if status == FileStatus::Recompiled || conservative_rebuild {
                recompile.push(source.clone());
            } else {
                reused += 1;
            }

            builder.set_file_state(source.clone(), state);
        }

        let current: BTreeSet<&Path> = sources.iter().map(PathBuf::as_path).collect();
        let removed: Vec<PathBuf> = previous
            .source_inputs()
            .iter()
            .filter(|p| !current.contains(p.as_path()))
            .cloned()
            .collect();

        recompile.sort();

        let state = builder.build();
        store.save(unit_key, &state)?;

        debug!(
            unit = unit_key,
            recompile = recompile.len(),
            reused,
            removed = removed.len(),
            "planned incremental compilation"
        );

        Ok(CompilationPlan {
            recompile,
            removed,
            existing_headers,
            unresolved_headers,
        })
    }

    /// Replays a previous state's edges against the current filesystem.
    ///
    /// Walks the recorded edges in order without re-parsing the source file,
    /// re-resolving each include path from its recorded includer context.
    /// Returns the set of currently resolved targets if every edge replays
    /// identically, or `None` on the first deviation (a target now missing,
    /// changed, or newly appearing where none was found).
    fn replay_edges(
        &self,
        source: &Path,
        prev: &SourceFileState,
        walker: &mut IncludeGraphWalker<'_>,
    ) -> Result<Option<BTreeSet<PathBuf>>, PlanError> {
        let source_dir = source.parent().map(Path::to_path_buf).unwrap_or_default();
        // Includer hashes map back to directories via the targets replayed
        // so far; edges are recorded in discovery order, so an includer
        // always precedes the edges it contributed.
        let mut dir_by_hash: HashMap<ContentHash, PathBuf> = HashMap::new();
        let mut targets = BTreeSet::new();

        for edge in &prev.edges {
            let context_dir = match edge.included_by {
                None => source_dir.clone(),
                Some(includer) => match dir_by_hash.get(&includer) {
                    Some(dir) => dir.clone(),
                    // An includer that never appeared as a replayed target
                    // means the recorded state is not self-consistent.
                    // Rebuilding is the safe answer.
                    None => return Ok(None),
                },
            };

            let resolved = walker
                .resolver_mut()
                .resolve(&edge.include_path, edge.kind, &context_dir)?;
            if resolved.hash != edge.resolved_to {
                return Ok(None);
            }
            if let (Some(path), Some(hash)) = (resolved.path, resolved.hash) {
                dir_by_hash
                    .entry(hash)
                    .or_insert_with(|| path.parent().map(Path::to_path_buf).unwrap_or_default());
                targets.insert(path);
            }
        }

        Ok(Some(targets))
    }
}
