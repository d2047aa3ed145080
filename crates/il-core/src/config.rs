//! Configuration for the converter

use serde::{Deserialize, Serialize};

/// Converter configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Maximum actions in one complex command
    pub max_actions: usize,
    /// Maximum edges in the dependency graph
    pub max_edge_count: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_actions: 10_000,
            max_edge_count: 100_000,
        }
    }
}
