//! The compilation-state data model.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use flint_common::ContentHash;
use flint_parse::IncludeKind;
use serde::{Deserialize, Serialize};

/// One edge in the flattened include graph of a source file.
///
/// `include_path` is the resolved token text after any macro expansion, and
/// `kind` the effective quoted/system form, so that the edge can be replayed
/// against the current filesystem without re-parsing or re-expanding
/// anything. `resolved_to` is `None` when no search root contained the file
/// at analysis time; recording the miss lets a later build notice when the
/// file appears. Edges are deduplicated by their full equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncludeFileEdge {
    /// The include path text, post macro expansion.
    pub include_path: String,
    /// The effective token kind, determining the search order on replay.
    pub kind: IncludeKind,
    /// Hash of the including file, or `None` if the edge originates at the
    /// root source file.
    pub included_by: Option<ContentHash>,
    /// Hash of the resolved target file, or `None` if it was not found.
    pub resolved_to: Option<ContentHash>,
}

/// Immutable snapshot of one source file's include analysis.
///
/// If `has_unresolved_includes` is `false`, every edge with a recorded
/// target referred to a file that existed at analysis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileState {
    /// Content hash of the source file when it was analyzed.
    pub hash: ContentHash,
    /// `true` if any macro-valued include could not be fully resolved.
    pub has_unresolved_includes: bool,
    /// Deduplicated include edges reachable from this file, in discovery
    /// order. An edge's includer always appears as an earlier edge's target
    /// (or is the root), which single-pass replay relies on.
    pub edges: Vec<IncludeFileEdge>,
}

/// Immutable snapshot of one compile task's incremental analysis.
///
/// Maps every considered source input to its [`SourceFileState`]. In a
/// finished, persisted snapshot the mapping covers the whole input set;
/// partial coverage exists only transiently inside the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationState {
    source_inputs: BTreeSet<PathBuf>,
    files: HashMap<PathBuf, SourceFileState>,
}

impl CompilationState {
    /// The set of all source input paths considered by the pass that
    /// produced this state.
    pub fn source_inputs(&self) -> &BTreeSet<PathBuf> {
        &self.source_inputs
    }

    /// Returns the recorded state for one source file, if it was analyzed.
    pub fn file_state(&self, path: &Path) -> Option<&SourceFileState> {
        self.files.get(path)
    }

    /// Returns `true` if this state tracks no source files.
    pub fn is_empty(&self) -> bool {
        self.source_inputs.is_empty()
    }
}

/// Mutable accumulator for a [`CompilationState`], owned by one planning
/// pass.
///
/// Sources are registered as the pass walks the current file list; their
/// states are filled in source-by-source. [`build`](Self::build) finalizes
/// the immutable snapshot that gets persisted.
#[derive(Debug, Default)]
pub struct CompilationStateBuilder {
    source_inputs: BTreeSet<PathBuf>,
    files: HashMap<PathBuf, SourceFileState>,
}

impl CompilationStateBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a path as part of the current source-input set.
    pub fn add_source_input(&mut self, path: impl Into<PathBuf>) {
        self.source_inputs.insert(path.into());
    }

    /// Records the analysis of one source file, registering it as an input
    /// if it was not already.
    pub fn set_file_state(&mut self, path: impl Into<PathBuf>, state: SourceFileState) {
        let path = path.into();
        self.source_inputs.insert(path.clone());
        self.files.insert(path, state);
    }

    /// Finalizes the immutable snapshot.
    pub fn build(self) -> CompilationState {
        CompilationState {
            source_inputs: self.source_inputs,
            files: self.files,
        }
    }
}
