//! Depth-first include-graph analysis of source files.
//!
//! The [`IncludeGraphWalker`] builds the transitive include graph of one
//! source file at a time: it parses directives through the pass-scoped
//! cache, resolves each include token (expanding macro-valued tokens against
//! the visibility accumulated along the branch), recurses into resolved
//! targets, and flattens everything into a deduplicated edge list plus a
//! resolution severity. Macro-independent analyses are memoized and reused
//! across the source files of the same pass.

#![warn(missing_docs)]

pub mod analysis;
pub mod error;
pub mod walker;

pub use analysis::{FileAnalysis, IncludeFilePath, IncludeResolution};
pub use error::WalkError;
pub use walker::IncludeGraphWalker;
