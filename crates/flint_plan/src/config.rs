//! Planner configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for one planner instance.
///
/// Deserializable so a host build tool can embed it in its own project
/// configuration; Flint itself ships no loader. Both fields default when
/// omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerConfig {
    /// Include roots searched, in order, to resolve include tokens.
    #[serde(default)]
    pub include_roots: Vec<PathBuf>,

    /// Suppresses the conservative handling of unresolved macro includes.
    ///
    /// When `false` (the default), a source file with an unresolved
    /// macro-valued include is recompiled on every pass, because the macro
    /// might resolve differently after an unrelated change elsewhere. When
    /// `true`, such files are reused like any other, an expert/CI override
    /// that trades that insurance for speed. The flag is scoped to this
    /// config (per project/task), never process-wide.
    #[serde(default)]
    pub ignore_unresolved_headers: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let config = PlannerConfig::default();
        assert!(config.include_roots.is_empty());
        assert!(!config.ignore_unresolved_headers);
    }

    #[test]
    fn deserializes_from_toml() {
        let config: PlannerConfig = toml::from_str(
            r#"
            include_roots = ["include", "vendor/include"]
            ignore_unresolved_headers = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.include_roots,
            vec![PathBuf::from("include"), PathBuf::from("vendor/include")]
        );
        assert!(config.ignore_unresolved_headers);
    }

    #[test]
    fn omitted_fields_default() {
        let config: PlannerConfig = toml::from_str("").unwrap();
        assert!(config.include_roots.is_empty());
        assert!(!config.ignore_unresolved_headers);
    }
}
