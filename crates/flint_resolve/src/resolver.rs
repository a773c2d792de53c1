//! Search-path resolution of quoted and system include tokens.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use flint_common::ContentHash;
use flint_parse::IncludeKind;
use flint_source::{ContentSnapshot, SnapshotError};

/// The result of resolving one include token against the search path.
///
/// `path` and `hash` are either both present (a regular file was found) or
/// both absent. "Not found" is a valid outcome, not an error: callers decide
/// how to treat a missing target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// The resolved file path, if any search root contained the token.
    pub path: Option<PathBuf>,
    /// The resolved file's content hash, if found.
    pub hash: Option<ContentHash>,
    /// The kind of the originating token.
    pub kind: IncludeKind,
}

impl ResolvedFile {
    /// Returns `true` if the token resolved to an existing file.
    pub fn is_found(&self) -> bool {
        self.hash.is_some()
    }
}

/// One memoized probe outcome: where the token landed under one root, if
/// anywhere.
#[derive(Debug, Clone)]
struct CachedLookup {
    path: PathBuf,
    hash: Option<ContentHash>,
}

/// Resolves include tokens along ordered search roots, memoizing per-root
/// lookups.
///
/// Quoted tokens search the including file's own directory first, then the
/// configured roots in order; system tokens search the roots only. Each
/// (root, token) probe hits the filesystem once per pass, including
/// negative probes, since an absent file stays absent for the duration of
/// one pass. The cache is pass-scoped, never cross-build: the filesystem may
/// change between builds.
pub struct SearchPathResolver<'a> {
    snapshot: &'a dyn ContentSnapshot,
    include_roots: Vec<PathBuf>,
    searched: HashMap<PathBuf, HashMap<String, CachedLookup>>,
}

impl<'a> SearchPathResolver<'a> {
    /// Creates a resolver over the given snapshot and ordered include roots.
    pub fn new(snapshot: &'a dyn ContentSnapshot, include_roots: Vec<PathBuf>) -> Self {
        Self {
            snapshot,
            include_roots,
            searched: HashMap::new(),
        }
    }

    /// Resolves one token of the given kind.
    ///
    /// `source_dir` is the directory of the including file; it heads the
    /// search path for quoted tokens and is ignored for system tokens.
    /// Macro tokens never reach the resolver (they are expanded to a
    /// quoted/system form first) and resolve like system tokens if passed.
    pub fn resolve(
        &mut self,
        value: &str,
        kind: IncludeKind,
        source_dir: &Path,
    ) -> Result<ResolvedFile, SnapshotError> {
        let prepend_source_dir = kind == IncludeKind::Quoted
            && self.include_roots.first().map(PathBuf::as_path) != Some(source_dir);

        if prepend_source_dir {
            if let Some(found) = self.search_root(source_dir.to_path_buf(), value)? {
                return Ok(ResolvedFile {
                    path: Some(found.path),
                    hash: found.hash,
                    kind,
                });
            }
        }
        for i in 0..self.include_roots.len() {
            let root = self.include_roots[i].clone();
            if let Some(found) = self.search_root(root, value)? {
                return Ok(ResolvedFile {
                    path: Some(found.path),
                    hash: found.hash,
                    kind,
                });
            }
        }
        Ok(ResolvedFile {
            path: None,
            hash: None,
            kind,
        })
    }

    /// Probes one root for the token, consulting the per-root memo first.
    ///
    /// Returns `Some` only for a hit on an existing file; a memoized
    /// "not found" short-circuits without touching the filesystem again.
    fn search_root(
        &mut self,
        root: PathBuf,
        value: &str,
    ) -> Result<Option<CachedLookup>, SnapshotError> {
        let entries = self.searched.entry(root.clone()).or_default();
        if let Some(cached) = entries.get(value) {
            return Ok(cached.hash.is_some().then(|| cached.clone()));
        }

        let candidate = root.join(value);
        let hash = self.snapshot.hash_of(&candidate)?;
        let lookup = CachedLookup {
            path: candidate,
            hash,
        };
        let hit = lookup.hash.is_some().then(|| lookup.clone());
        self.searched
            .entry(root)
            .or_default()
            .insert(value.to_string(), lookup);
        Ok(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flint_source::MemorySnapshot;
    use std::cell::Cell;

    struct CountingSnapshot {
        inner: MemorySnapshot,
        probes: Cell<usize>,
    }

    impl ContentSnapshot for CountingSnapshot {
        fn hash_of(&self, path: &Path) -> Result<Option<ContentHash>, SnapshotError> {
            self.probes.set(self.probes.get() + 1);
            self.inner.hash_of(path)
        }
    }

    fn counting(files: &[(&str, &str)]) -> CountingSnapshot {
        let mut inner = MemorySnapshot::new();
        for (path, content) in files {
            inner.insert(*path, content.as_bytes());
        }
        CountingSnapshot {
            inner,
            probes: Cell::new(0),
        }
    }

    #[test]
    fn quoted_prefers_source_directory() {
        let snapshot = counting(&[("src/a.h", "local"), ("include/a.h", "root")]);
        let mut resolver = SearchPathResolver::new(&snapshot, vec![PathBuf::from("include")]);

        let resolved = resolver
            .resolve("a.h", IncludeKind::Quoted, Path::new("src"))
            .unwrap();
        assert_eq!(resolved.path.as_deref(), Some(Path::new("src/a.h")));
        assert_eq!(resolved.hash, Some(ContentHash::from_bytes(b"local")));
    }

    #[test]
    fn system_skips_source_directory() {
        let snapshot = counting(&[("src/a.h", "local"), ("include/a.h", "root")]);
        let mut resolver = SearchPathResolver::new(&snapshot, vec![PathBuf::from("include")]);

        let resolved = resolver
            .resolve("a.h", IncludeKind::System, Path::new("src"))
            .unwrap();
        assert_eq!(resolved.path.as_deref(), Some(Path::new("include/a.h")));
    }

    #[test]
    fn roots_searched_in_configured_order() {
        let snapshot = counting(&[("second/a.h", "2"), ("first/a.h", "1")]);
        let mut resolver = SearchPathResolver::new(
            &snapshot,
            vec![PathBuf::from("first"), PathBuf::from("second")],
        );

        let resolved = resolver
            .resolve("a.h", IncludeKind::System, Path::new("src"))
            .unwrap();
        assert_eq!(resolved.path.as_deref(), Some(Path::new("first/a.h")));
    }

    #[test]
    fn not_found_is_absent_not_error() {
        let snapshot = counting(&[]);
        let mut resolver = SearchPathResolver::new(&snapshot, vec![PathBuf::from("include")]);

        let resolved = resolver
            .resolve("missing.h", IncludeKind::System, Path::new("src"))
            .unwrap();
        assert!(!resolved.is_found());
        assert!(resolved.path.is_none());
    }

    #[test]
    fn positive_lookups_are_memoized() {
        let snapshot = counting(&[("include/a.h", "x")]);
        let mut resolver = SearchPathResolver::new(&snapshot, vec![PathBuf::from("include")]);

        resolver
            .resolve("a.h", IncludeKind::System, Path::new("src"))
            .unwrap();
        let after_first = snapshot.probes.get();
        resolver
            .resolve("a.h", IncludeKind::System, Path::new("src"))
            .unwrap();
        assert_eq!(snapshot.probes.get(), after_first);
    }

    #[test]
    fn negative_lookups_are_memoized() {
        let snapshot = counting(&[]);
        let mut resolver = SearchPathResolver::new(
            &snapshot,
            vec![PathBuf::from("first"), PathBuf::from("second")],
        );

        resolver
            .resolve("missing.h", IncludeKind::System, Path::new("src"))
            .unwrap();
        assert_eq!(snapshot.probes.get(), 2);
        resolver
            .resolve("missing.h", IncludeKind::System, Path::new("src"))
            .unwrap();
        assert_eq!(snapshot.probes.get(), 2);
    }

    #[test]
    fn source_dir_not_probed_twice_when_first_root() {
        // When the source directory already heads the include path, quoted
        // resolution must not probe it a second time.
        let snapshot = counting(&[("src/a.h", "x")]);
        let mut resolver = SearchPathResolver::new(&snapshot, vec![PathBuf::from("src")]);

        let resolved = resolver
            .resolve("a.h", IncludeKind::Quoted, Path::new("src"))
            .unwrap();
        assert!(resolved.is_found());
        assert_eq!(snapshot.probes.get(), 1);
    }

    #[test]
    fn memo_is_shared_across_source_files() {
        // Two different including files resolving the same system token
        // against the same roots cost one probe total.
        let snapshot = counting(&[("include/shared.h", "x")]);
        let mut resolver = SearchPathResolver::new(&snapshot, vec![PathBuf::from("include")]);

        resolver
            .resolve("shared.h", IncludeKind::System, Path::new("src/a"))
            .unwrap();
        resolver
            .resolve("shared.h", IncludeKind::System, Path::new("src/b"))
            .unwrap();
        assert_eq!(snapshot.probes.get(), 1);
    }
}
