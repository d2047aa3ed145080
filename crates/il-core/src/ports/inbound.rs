//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{ComplexCommand, DependencyGraph, Sequence};
use crate::domain::errors::ConversionError;

/// Primary conversion API
pub trait ConversionApi: Send + Sync {
    /// Linearize a complex command into a dependency-valid sequence.
    ///
    /// This is the main entry point. It:
    /// 1. Checks configured limits
    /// 2. Builds and validates the dependency graph
    /// 3. Performs the stable topological sort
    /// 4. Returns the sequence
    fn convert(&self, command: &ComplexCommand) -> Result<Sequence, ConversionError>;

    /// Build the dependency graph for a command.
    ///
    /// Pure function; fails on unresolved identifiers.
    fn build_dependency_graph(
        &self,
        command: &ComplexCommand,
    ) -> Result<DependencyGraph, ConversionError>;

    /// Order action positions of `command` using its graph.
    ///
    /// `graph` must come from `build_dependency_graph(command)`; any other
    /// graph fails with `EmptyOrInvalidCommand`.
    fn schedule(
        &self,
        command: &ComplexCommand,
        graph: &DependencyGraph,
    ) -> Result<Vec<usize>, ConversionError>;
}
