//! Hierarchy graph construction and simplification
//!
//! This module provides the n-gram containment graph, its builder, the
//! fixed-point pruner and ancestor support aggregation.

pub mod builder;
pub mod hierarchy;
pub mod prune;
pub mod support;

pub use builder::HierarchyBuilder;
pub use hierarchy::HierarchyGraph;
pub use prune::{PruneStats, Pruner};
pub use support::add_ancestor_support;
