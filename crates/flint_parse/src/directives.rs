//! Structured representation of one file's include-relevant directives.

use serde::{Deserialize, Serialize};

/// The syntactic kind of an include token.
///
/// Modeled as a tagged variant rather than subtyping: every consumer matches
/// exhaustively on the kind, and the kind is persisted inside include-graph
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncludeKind {
    /// `#include "header.h"`: searched from the including file's directory
    /// first, then the configured include roots.
    Quoted,
    /// `#include <header.h>`: searched along the configured include roots
    /// only.
    System,
    /// `#include HEADER_MACRO`: the token is a macro name that must be
    /// expanded against the currently visible definitions before path
    /// resolution.
    Macro,
}

/// One raw include directive: the textual target plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncludeToken {
    /// The token text: a literal path for quoted/system tokens, a macro name
    /// for macro tokens.
    pub value: String,
    /// The syntactic kind of the token.
    pub kind: IncludeKind,
}

impl IncludeToken {
    /// Creates a quoted include token (`#include "value"`).
    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IncludeKind::Quoted,
        }
    }

    /// Creates a system include token (`#include <value>`).
    pub fn system(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IncludeKind::System,
        }
    }

    /// Creates a macro-valued include token (`#include VALUE`).
    pub fn macro_ref(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IncludeKind::Macro,
        }
    }
}

/// The body of an object-like `#define` as far as include resolution cares.
///
/// The directive parser reduces each macro body to one of these shapes;
/// anything it cannot shape into a potential include target is
/// [`MacroValue::Unresolvable`], which resolves to "unresolved" rather than
/// an error when an include actually references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacroValue {
    /// The macro expands to a quoted path, e.g. `#define CONF "conf.h"`.
    Quoted(String),
    /// The macro expands to a system path, e.g. `#define CONF <conf.h>`.
    System(String),
    /// The macro expands to another identifier, followed transitively.
    Reference(String),
    /// The macro body is not usable as an include target.
    Unresolvable,
}

/// An object-like macro definition visible to include resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDef {
    /// The macro name.
    pub name: String,
    /// The macro body, reduced to the include-target subset.
    pub value: MacroValue,
}

impl MacroDef {
    /// Creates a macro definition.
    pub fn new(name: impl Into<String>, value: MacroValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// All include-relevant directives of one file, in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDirectives {
    /// The file's include/import tokens, in order of appearance.
    pub includes: Vec<IncludeToken>,
    /// The file's object-like macro definitions, in order of appearance.
    pub macros: Vec<MacroDef>,
}

impl FileDirectives {
    /// Creates a directive set from its parts.
    pub fn new(includes: Vec<IncludeToken>, macros: Vec<MacroDef>) -> Self {
        Self { includes, macros }
    }

    /// A directive set with no includes and no macros.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if any include token requires macro expansion.
    pub fn has_macro_includes(&self) -> bool {
        self.includes
            .iter()
            .any(|t| t.kind == IncludeKind::Macro)
    }

    /// Looks up the first macro definition with the given name.
    pub fn macro_named(&self, name: &str) -> Option<&MacroDef> {
        self.macros.iter().find(|m| m.name == name)
    }
}
