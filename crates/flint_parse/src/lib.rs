//! The include-directive data model and parsing boundary.
//!
//! A file's `#include`/`#import`/`#define` directives are lexed by an
//! external collaborator; the planner consumes them through the
//! [`IncludeDirectiveSource`] trait as structured [`FileDirectives`]. This
//! crate defines that model: include tokens tagged by kind (quoted, system,
//! or macro-valued), and the subset of object-like macro definitions that
//! can serve as include targets.

#![warn(missing_docs)]

pub mod directives;
pub mod error;
pub mod source;

pub use directives::{FileDirectives, IncludeKind, IncludeToken, MacroDef, MacroValue};
pub use error::ParseError;
pub use source::{IncludeDirectiveSource, MemoryDirectiveSource};
