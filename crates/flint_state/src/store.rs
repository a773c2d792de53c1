//! Persistent storage of compilation states between builds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use flint_common::ContentHash;

use crate::error::StateError;
use crate::serialize::{decode_state, encode_state};
use crate::state::CompilationState;

/// The external key-value persistence primitive.
///
/// Values are opaque byte strings; the serialization contract lives in the
/// [`CompilationStateStore`] layered on top. Any backing mechanism works
/// (a directory of files, an embedded KV store, a build-tool cache) as long
/// as `get` returns what the last `put` stored for the key.
pub trait ObjectStore {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StateError>;
}

/// [`ObjectStore`] backed by one file per key under a store directory.
///
/// File names are derived from the hash of the key, so arbitrary unit keys
/// (task paths, target triples) need no escaping.
#[derive(Debug)]
pub struct FsObjectStore {
    dir: PathBuf,
}

impl FsObjectStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created on first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let name = ContentHash::from_bytes(key.as_bytes()).to_hex();
        self.dir.join(format!("{name}.state"))
    }
}

impl ObjectStore for FsObjectStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        let path = self.entry_path(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StateError::Io { path, source: e }),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StateError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StateError::Io {
            path: self.dir.clone(),
            source: e,
        })?;
        let path = self.entry_path(key);
        std::fs::write(&path, value).map_err(|e| StateError::Io { path, source: e })
    }
}

/// [`ObjectStore`] backed by a map (useful for tests).
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StateError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Persistent cache mapping a compilation-unit identity to its last
/// [`CompilationState`].
///
/// Applies the versioned serialization contract over a plain
/// [`ObjectStore`]. Loads are fail-safe: a missing, corrupt, unreadable, or
/// version-mismatched entry is "no previous state", which forces a full
/// rebuild of the unit. Store access for a given unit key is exclusive for
/// the duration of one planning pass; that exclusion is the surrounding
/// orchestration's job, not this type's.
pub struct CompilationStateStore<S: ObjectStore> {
    store: S,
}

impl<S: ObjectStore> CompilationStateStore<S> {
    /// Wraps the given object store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the previous state for `unit_key`, or `None` if there is no
    /// usable one.
    pub fn load(&self, unit_key: &str) -> Option<CompilationState> {
        let bytes = self.store.get(unit_key).ok()??;
        decode_state(&bytes)
    }

    /// Persists the finalized state for `unit_key`.
    pub fn save(&mut self, unit_key: &str, state: &CompilationState) -> Result<(), StateError> {
        let bytes = encode_state(state)?;
        self.store.put(unit_key, &bytes)
    }
}
