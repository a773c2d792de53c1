//! Per-file analysis results.

use std::collections::HashSet;
use std::path::PathBuf;

use flint_common::ContentHash;
use flint_state::IncludeFileEdge;

/// How completely a file's include graph resolved.
///
/// Ordered by severity; a file's outcome is the maximum over itself and all
/// its resolved children. Only `NoMacroIncludes` analyses are safe to reuse
/// from a different including context, because they cannot be affected by
/// which macros happen to be visible there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum IncludeResolution {
    /// No macro-valued include anywhere beneath this file.
    #[default]
    NoMacroIncludes,
    /// Macro-valued includes were encountered and all of them resolved.
    MacroIncludesResolved,
    /// At least one macro-valued include could not be resolved.
    UnresolvedMacroIncludes,
}

/// A resolved include target: its path and content hash at analysis time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncludeFilePath {
    /// The resolved file path.
    pub path: PathBuf,
    /// The file's content hash when it was resolved.
    pub hash: ContentHash,
}

/// The flattened analysis of one file's include graph.
///
/// Edges and include files are deduplicated and kept in discovery (DFS)
/// order: an edge's includer is always discovered before the edges it
/// contributes, which edge replay in the planner relies on.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    resolution: IncludeResolution,
    edges: Vec<IncludeFileEdge>,
    edge_set: HashSet<IncludeFileEdge>,
    include_files: Vec<IncludeFilePath>,
    include_set: HashSet<PathBuf>,
}

impl FileAnalysis {
    /// Creates an empty analysis with the lowest severity.
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolution outcome, `NoMacroIncludes` if nothing escalated it.
    pub fn resolution(&self) -> IncludeResolution {
        self.resolution
    }

    /// Returns `true` if any macro-valued include failed to resolve.
    pub fn has_unresolved(&self) -> bool {
        self.resolution() == IncludeResolution::UnresolvedMacroIncludes
    }

    /// The deduplicated edges, in discovery order.
    pub fn edges(&self) -> &[IncludeFileEdge] {
        &self.edges
    }

    /// The deduplicated resolved include targets, in discovery order.
    pub fn include_files(&self) -> &[IncludeFilePath] {
        &self.include_files
    }

    /// Consumes the analysis, returning the edge list.
    pub fn into_edges(self) -> Vec<IncludeFileEdge> {
        self.edges
    }

    /// Raises the resolution outcome to at least `severity`.
    pub(crate) fn escalate(&mut self, severity: IncludeResolution) {
        self.resolution = self.resolution.max(severity);
    }

    /// Records one edge, ignoring exact duplicates.
    pub(crate) fn push_edge(&mut self, edge: IncludeFileEdge) {
        if self.edge_set.insert(edge.clone()) {
            self.edges.push(edge);
        }
    }

    /// Records one resolved target, ignoring duplicate paths.
    pub(crate) fn push_include_file(&mut self, file: IncludeFilePath) {
        if self.include_set.insert(file.path.clone()) {
            self.include_files.push(file);
        }
    }

    /// Merges a child analysis: severity is maxed, edges and targets are
    /// appended with deduplication.
    pub(crate) fn merge(&mut self, child: &FileAnalysis) {
        self.escalate(child.resolution());
        for edge in &child.edges {
            self.push_edge(edge.clone());
        }
        for file in &child.include_files {
            self.push_include_file(file.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flint_parse::IncludeKind;

    fn edge(path: &str) -> IncludeFileEdge {
        IncludeFileEdge {
            include_path: path.to_string(),
            kind: IncludeKind::Quoted,
            included_by: None,
            resolved_to: Some(ContentHash::from_bytes(path.as_bytes())),
        }
    }

    #[test]
    fn severity_is_ordered() {
        assert!(IncludeResolution::NoMacroIncludes < IncludeResolution::MacroIncludesResolved);
        assert!(
            IncludeResolution::MacroIncludesResolved < IncludeResolution::UnresolvedMacroIncludes
        );
    }

    #[test]
    fn escalate_never_lowers() {
        let mut analysis = FileAnalysis::new();
        analysis.escalate(IncludeResolution::UnresolvedMacroIncludes);
        analysis.escalate(IncludeResolution::MacroIncludesResolved);
        assert_eq!(
            analysis.resolution(),
            IncludeResolution::UnresolvedMacroIncludes
        );
        assert!(analysis.has_unresolved());
    }

    #[test]
    fn duplicate_edges_are_dropped() {
        let mut analysis = FileAnalysis::new();
        analysis.push_edge(edge("a.h"));
        analysis.push_edge(edge("a.h"));
        analysis.push_edge(edge("b.h"));
        assert_eq!(analysis.edges().len(), 2);
    }

    #[test]
    fn merge_combines_and_dedups() {
        let mut parent = FileAnalysis::new();
        parent.push_edge(edge("a.h"));

        let mut child = FileAnalysis::new();
        child.push_edge(edge("a.h"));
        child.push_edge(edge("c.h"));
        child.escalate(IncludeResolution::MacroIncludesResolved);
        child.push_include_file(IncludeFilePath {
            path: PathBuf::from("c.h"),
            hash: ContentHash::from_bytes(b"c"),
        });

        parent.merge(&child);
        assert_eq!(parent.edges().len(), 2);
        assert_eq!(parent.include_files().len(), 1);
        assert_eq!(
            parent.resolution(),
            IncludeResolution::MacroIncludesResolved
        );
    }

    #[test]
    fn discovery_order_is_preserved() {
        let mut analysis = FileAnalysis::new();
        analysis.push_edge(edge("first.h"));
        analysis.push_edge(edge("second.h"));
        analysis.push_edge(edge("first.h"));
        let paths: Vec<_> = analysis
            .edges()
            .iter()
            .map(|e| e.include_path.as_str())
            .collect();
        assert_eq!(paths, vec!["first.h", "second.h"]);
    }
}
