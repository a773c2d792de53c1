//! Include-token resolution against search roots and visible macros.
//!
//! This crate resolves a single include token to a concrete file: quoted and
//! system tokens are searched along ordered roots ([`SearchPathResolver`]),
//! macro tokens are first expanded against the macro definitions visible at
//! the current point of the traversal ([`MacroVisibilityLookup`]). Both sit
//! on top of a pass-scoped parse memo ([`DirectiveCache`]).
//!
//! All caches here are owned by exactly one planning pass and must not
//! outlive it: the filesystem facts they record are only valid for that
//! pass's lifetime.

#![warn(missing_docs)]

pub mod cache;
pub mod macros;
pub mod resolver;

pub use cache::DirectiveCache;
pub use macros::{ExpandedInclude, MacroVisibilityLookup};
pub use resolver::{ResolvedFile, SearchPathResolver};
