//! Error types for IL construction and conversion

use super::value_objects::Identifier;
use thiserror::Error;

/// All errors that can occur while building or converting commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Two actions in one command set bind the same identifier
    #[error("Duplicate declaration of identifier {identifier}")]
    DuplicateDeclaration { identifier: Identifier },

    /// A reference names an identifier no action declares
    #[error("Unresolved reference to {}{}", .identifier, dependent_suffix(.dependent))]
    UnresolvedReference {
        identifier: Identifier,
        /// Result of the referencing action, `None` for the return value
        dependent: Option<Identifier>,
    },

    /// The dependency graph contains a cycle
    #[error("Dependency cycle through {}: {}", .identifier, cycle_path(.cycle))]
    DependencyCycle {
        identifier: Identifier,
        cycle: Vec<Identifier>,
    },

    /// Empty command set or malformed input
    #[error("Empty or invalid command: {reason}")]
    EmptyOrInvalidCommand { reason: String },

    /// Command set exceeds the configured action limit
    #[error("Too many actions: {count} > {max}")]
    TooManyActions { count: usize, max: usize },

    /// Dependency graph exceeds the configured edge limit
    #[error("Edge count exceeded: {count} > {max}")]
    TooManyEdges { count: usize, max: usize },

    /// Renderer failed to produce output
    #[error("Render failed: {0}")]
    Render(String),
}

impl ConversionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConversionError::EmptyOrInvalidCommand {
            reason: reason.into(),
        }
    }

    /// True for the four structural kinds (duplicate, unresolved, cycle,
    /// empty/invalid); false for limit and render failures.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ConversionError::DuplicateDeclaration { .. }
                | ConversionError::UnresolvedReference { .. }
                | ConversionError::DependencyCycle { .. }
                | ConversionError::EmptyOrInvalidCommand { .. }
        )
    }
}

fn dependent_suffix(dependent: &Option<Identifier>) -> String {
    match dependent {
        Some(id) => format!(" from action binding {}", id),
        None => " from return value".to_string(),
    }
}

fn cycle_path(cycle: &[Identifier]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(Identifier::name).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.name());
    }
    parts.join(" -> ")
}
