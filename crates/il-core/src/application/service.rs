//! Conversion Service
//!
//! Main service implementing ConversionApi.

use crate::algorithms::{build_dependency_graph, kahns_topological_sort};
use crate::config::ConverterConfig;
use crate::domain::entities::{Command, ComplexCommand, DependencyGraph, Sequence};
use crate::domain::errors::ConversionError;
use crate::domain::invariants;
use crate::ports::inbound::ConversionApi;

use tracing::{debug, info};

/// Converter from complex commands to sequences
///
/// Orchestrates the conversion pipeline:
/// 1. Validate command size
/// 2. Build dependency graph (index and resolution passes)
/// 3. Check edge count
/// 4. Execute Kahn's algorithm
/// 5. Return the sequence
///
/// Stateless between calls. Nothing is returned on failure.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    /// Create a new converter with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new converter with custom config
    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert either kind of command.
    ///
    /// A simple command becomes a one-element complex command first.
    pub fn convert_command(
        &self,
        command: impl Into<Command>,
    ) -> Result<Sequence, ConversionError> {
        self.convert(&command.into().into_complex())
    }

    fn validate_size(&self, command: &ComplexCommand) -> Result<(), ConversionError> {
        if command.is_empty() {
            return Err(ConversionError::invalid("command contains no actions"));
        }

        if command.len() > self.config.max_actions {
            return Err(ConversionError::TooManyActions {
                count: command.len(),
                max: self.config.max_actions,
            });
        }

        Ok(())
    }
}

impl ConversionApi for Converter {
    fn convert(&self, command: &ComplexCommand) -> Result<Sequence, ConversionError> {
        // 1. Validate input
        self.validate_size(command)?;

        debug!(action_count = command.len(), "Converting complex command");

        // 2. Build dependency graph
        let graph = self.build_dependency_graph(command)?;

        // 3. Validate edge count
        if graph.edge_count() > self.config.max_edge_count {
            return Err(ConversionError::TooManyEdges {
                count: graph.edge_count(),
                max: self.config.max_edge_count,
            });
        }

        // 4. Order
        let order = self.schedule(command, &graph)?;
        debug_assert!(invariants::invariant_no_cycles(&graph));

        let reordered = order.iter().enumerate().any(|(i, &pos)| i != pos);
        let commands = command.commands();
        let actions = order
            .iter()
            .map(|&pos| commands[pos].action().clone())
            .collect();
        let sequence = Sequence::new(actions, command.returns().cloned());

        debug_assert!(invariants::invariant_dependency_order(&sequence));
        debug_assert!(invariants::invariant_completeness(&sequence, command));

        info!(
            action_count = sequence.len(),
            edge_count = graph.edge_count(),
            reordered,
            "Conversion complete"
        );

        Ok(sequence)
    }

    fn build_dependency_graph(
        &self,
        command: &ComplexCommand,
    ) -> Result<DependencyGraph, ConversionError> {
        build_dependency_graph(command)
    }

    fn schedule(
        &self,
        command: &ComplexCommand,
        graph: &DependencyGraph,
    ) -> Result<Vec<usize>, ConversionError> {
        kahns_topological_sort(command, graph)
    }
}
