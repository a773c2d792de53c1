//! The incremental compilation planner.
//!
//! Given the full current source-file list of one compile task, the
//! [`IncrementalCompilationPlanner`] decides which files must be recompiled
//! and which can be skipped: new and content-changed files are re-analyzed
//! from scratch, unchanged files have their previously recorded include
//! edges replayed against the current filesystem, and files whose whole
//! graph still resolves identically are reused. The finished analysis is
//! persisted through a [`CompilationStateStore`](flint_state) for the next
//! build.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod plan;
pub mod planner;

pub use config::PlannerConfig;
pub use error::PlanError;
pub use plan::CompilationPlan;
pub use planner::IncrementalCompilationPlanner;
