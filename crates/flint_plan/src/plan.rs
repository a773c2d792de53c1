//! The planning result handed back to the compile-task driver.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::PlanError;

/// The outcome of one planning pass.
///
/// Plain immutable collections; the planner performs no compilation and no
/// output cleanup itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationPlan {
    /// Source files that must be recompiled, sorted.
    pub recompile: Vec<PathBuf>,

    /// Source files present in the previous pass but absent from the
    /// current input list, sorted. Their outputs should be cleaned.
    pub removed: Vec<PathBuf>,

    /// Every header the current analysis resolved to an existing file.
    pub existing_headers: BTreeSet<PathBuf>,

    /// `true` if any tracked file has unresolved macro includes, in which
    /// case [`discovered_inputs`](Self::discovered_inputs) falls back to the
    /// coarse all-roots scan.
    pub unresolved_headers: bool,
}

impl CompilationPlan {
    /// Returns `true` if nothing needs recompiling or cleaning.
    pub fn is_up_to_date(&self) -> bool {
        self.recompile.is_empty() && self.removed.is_empty()
    }

    /// The header files the caller should register as inputs for future
    /// up-to-date checks.
    ///
    /// Normally this is the precise set of resolved headers. When any file
    /// has unresolved macro includes the true dependency set is unknowable,
    /// so every file under every include root is added as well: coarse but
    /// safe. Quoted includes resolved outside the roots stay in the set
    /// either way.
    pub fn discovered_inputs(
        &self,
        include_roots: &[PathBuf],
    ) -> Result<BTreeSet<PathBuf>, PlanError> {
        let mut inputs = self.existing_headers.clone();
        if self.unresolved_headers {
            for root in include_roots {
                if root.is_dir() {
                    collect_files(root, &mut inputs)?;
                }
            }
        }
        Ok(inputs)
    }
}

/// Recursively collects every file under `dir`.
fn collect_files(dir: &Path, into: &mut BTreeSet<PathBuf>) -> Result<(), PlanError> {
    let entries = std::fs::read_dir(dir).map_err(|e| PlanError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| PlanError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, into)?;
        } else {
            into.insert(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(unresolved: bool, headers: &[&str]) -> CompilationPlan {
        CompilationPlan {
            recompile: vec![],
            removed: vec![],
            existing_headers: headers.iter().map(PathBuf::from).collect(),
            unresolved_headers: unresolved,
        }
    }

    #[test]
    fn up_to_date_when_empty() {
        assert!(plan(false, &[]).is_up_to_date());
        let dirty = CompilationPlan {
            recompile: vec![PathBuf::from("a.c")],
            ..plan(false, &[])
        };
        assert!(!dirty.is_up_to_date());
    }

    #[test]
    fn discovered_inputs_precise_when_resolved() {
        let p = plan(false, &["include/a.h"]);
        let inputs = p.discovered_inputs(&[PathBuf::from("include")]).unwrap();
        assert_eq!(inputs.len(), 1);
        assert!(inputs.contains(Path::new("include/a.h")));
    }

    #[test]
    fn discovered_inputs_fall_back_on_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("include");
        std::fs::create_dir_all(root.join("sys")).unwrap();
        std::fs::write(root.join("a.h"), "a").unwrap();
        std::fs::write(root.join("sys").join("b.h"), "b").unwrap();

        let p = plan(true, &["elsewhere/known.h"]);
        let inputs = p.discovered_inputs(&[root.clone()]).unwrap();

        // The whole root is swept, recursively, and precisely known headers
        // outside the roots are kept.
        assert!(inputs.contains(&root.join("a.h")));
        assert!(inputs.contains(&root.join("sys").join("b.h")));
        assert!(inputs.contains(Path::new("elsewhere/known.h")));
    }

    #[test]
    fn discovered_inputs_skip_missing_roots() {
        let p = plan(true, &[]);
        let inputs = p
            .discovered_inputs(&[PathBuf::from("/no/such/root")])
            .unwrap();
        assert!(inputs.is_empty());
    }
}
