//! The content snapshot boundary and its implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use flint_common::ContentHash;

use crate::error::SnapshotError;

/// Answers "does this file exist, and what is its content hash".
///
/// This is the planner's only view of file content. `Ok(None)` means the
/// path does not name a regular file; `Err` is reserved for genuine I/O
/// failures, which are the only condition that propagates as a hard error.
pub trait ContentSnapshot {
    /// Returns the content hash of `path`, or `None` if no regular file
    /// exists there.
    fn hash_of(&self, path: &Path) -> Result<Option<ContentHash>, SnapshotError>;
}

/// [`ContentSnapshot`] backed by the real filesystem.
///
/// Stateless; memoization of repeated lookups is the responsibility of the
/// pass-scoped resolver cache, since filesystem state is only stable for the
/// duration of one planning pass.
#[derive(Debug, Default)]
pub struct FsSnapshot;

impl FsSnapshot {
    /// Creates a filesystem snapshot.
    pub fn new() -> Self {
        Self
    }
}

impl ContentSnapshot for FsSnapshot {
    fn hash_of(&self, path: &Path) -> Result<Option<ContentHash>, SnapshotError> {
        // A directory is "not a file" for include resolution purposes.
        if path.is_dir() {
            return Ok(None);
        }
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(ContentHash::from_bytes(&bytes))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

/// [`ContentSnapshot`] backed by an in-memory file set (useful for tests).
///
/// Files are registered with their content; hashes are computed on insert.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    files: HashMap<PathBuf, ContentHash>,
}

impl MemorySnapshot {
    /// Creates an empty in-memory snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` with the given content, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: &[u8]) {
        self.files
            .insert(path.into(), ContentHash::from_bytes(content));
    }

    /// Removes `path`, simulating file deletion.
    pub fn remove(&mut self, path: &Path) {
        self.files.remove(path);
    }
}

impl ContentSnapshot for MemorySnapshot {
    fn hash_of(&self, path: &Path) -> Result<Option<ContentHash>, SnapshotError> {
        Ok(self.files.get(path).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_hash_matches_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.h");
        std::fs::write(&path, "#define A 1").unwrap();

        let snapshot = FsSnapshot::new();
        let hash = snapshot.hash_of(&path).unwrap().unwrap();
        assert_eq!(hash, ContentHash::from_bytes(b"#define A 1"));
    }

    #[test]
    fn fs_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = FsSnapshot::new();
        assert!(snapshot
            .hash_of(&dir.path().join("missing.h"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn fs_directory_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("include");
        std::fs::create_dir(&sub).unwrap();

        let snapshot = FsSnapshot::new();
        assert!(snapshot.hash_of(&sub).unwrap().is_none());
    }

    #[test]
    fn memory_insert_and_query() {
        let mut snapshot = MemorySnapshot::new();
        snapshot.insert("include/a.h", b"int a;");
        let hash = snapshot.hash_of(Path::new("include/a.h")).unwrap().unwrap();
        assert_eq!(hash, ContentHash::from_bytes(b"int a;"));
        assert!(snapshot.hash_of(Path::new("include/b.h")).unwrap().is_none());
    }

    #[test]
    fn memory_insert_replaces() {
        let mut snapshot = MemorySnapshot::new();
        snapshot.insert("a.h", b"old");
        let old = snapshot.hash_of(Path::new("a.h")).unwrap().unwrap();
        snapshot.insert("a.h", b"new");
        let new = snapshot.hash_of(Path::new("a.h")).unwrap().unwrap();
        assert_ne!(old, new);
    }

    #[test]
    fn memory_remove_simulates_deletion() {
        let mut snapshot = MemorySnapshot::new();
        snapshot.insert("a.h", b"content");
        snapshot.remove(Path::new("a.h"));
        assert!(snapshot.hash_of(Path::new("a.h")).unwrap().is_none());
    }
}
