//! Algorithms module for conversion
//!
//! Contains:
//! - Dependency graph builder (index pass + resolution check)
//! - Kahn's topological sort with stable tie-breaking

pub mod dependency_builder;
pub mod kahns;

pub use dependency_builder::build_dependency_graph;
pub use kahns::kahns_topological_sort;
