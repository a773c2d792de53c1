//! Shared foundational types for the Flint incremental compilation planner.
//!
//! This crate provides the [`ContentHash`] digest used throughout the planner
//! as both a change-detection signal and a graph-node identity key.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
