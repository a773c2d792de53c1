//! Persisted compilation state for incremental recompilation planning.
//!
//! A [`CompilationState`] is the unit of memory between builds: for one
//! compile task it records every source input together with each source
//! file's content hash, unresolved-include flag, and flattened include-graph
//! edges. States are built incrementally during a planning pass via
//! [`CompilationStateBuilder`], finalized into an immutable snapshot, and
//! persisted through [`CompilationStateStore`] over a pluggable
//! [`ObjectStore`]. All reads are fail-safe: corruption or a stale format
//! version costs a full rebuild, never an error.

#![warn(missing_docs)]

pub mod error;
pub mod serialize;
pub mod state;
pub mod store;

pub use error::StateError;
pub use state::{CompilationState, CompilationStateBuilder, IncludeFileEdge, SourceFileState};
pub use store::{CompilationStateStore, FsObjectStore, MemoryObjectStore, ObjectStore};
