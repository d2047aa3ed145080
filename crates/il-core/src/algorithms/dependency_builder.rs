//! Dependency Graph Builder
//!
//! Index pass over a complex command: maps each identifier to its declaring
//! action, resolves every reference, and records edges in both directions.

use crate::domain::entities::{ComplexCommand, DependencyGraph};
use crate::domain::errors::ConversionError;
use tracing::{debug, warn};

/// Build the dependency graph of a complex command.
///
/// Fails with `UnresolvedReference` for the first reference (in insertion
/// order, then the return value) naming an undeclared identifier.
/// References nested in array and object sources count like top-level ones.
pub fn build_dependency_graph(command: &ComplexCommand) -> Result<DependencyGraph, ConversionError> {
    let mut graph = DependencyGraph::with_nodes(command.len());

    // Declarations first so forward references resolve. Results are unique:
    // `VectorSimpleCommand::add` refuses duplicates.
    for (pos, action) in command.actions().enumerate() {
        graph.declarations.insert(action.result().clone(), pos);
    }

    for (pos, action) in command.actions().enumerate() {
        for identifier in action.references() {
            let Some(declarer) = graph.declarer(identifier) else {
                warn!(
                    identifier = %identifier,
                    dependent = %action.result(),
                    "Unresolved reference"
                );
                return Err(ConversionError::UnresolvedReference {
                    identifier: identifier.clone(),
                    dependent: Some(action.result().clone()),
                });
            };
            graph.add_edge(declarer, pos);
        }
    }

    let returned = command.returns().map(|source| source.references());
    for identifier in returned.into_iter().flatten() {
        if graph.declarer(identifier).is_none() {
            warn!(identifier = %identifier, "Unresolved return reference");
            return Err(ConversionError::UnresolvedReference {
                identifier: identifier.clone(),
                dependent: None,
            });
        }
    }

    debug!(
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        "Built dependency graph"
    );

    Ok(graph)
}
