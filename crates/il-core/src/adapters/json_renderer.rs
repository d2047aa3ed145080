//! JSON Renderer Adapter
//!
//! Serializes a sequence into a stable JSON document for tooling that
//! consumes the ordered program instead of reading the text listing.

use crate::domain::entities::{Action, Operation, Sequence};
use crate::domain::errors::ConversionError;
use crate::domain::value_objects::ValueSource;
use crate::ports::outbound::SequenceRenderer;
use serde::Serialize;

// ============================================================
// PAYLOADS
// ============================================================

/// Whole sequence, in final order.
#[derive(Debug, Clone, Serialize)]
pub struct SequencePayload<'a> {
    pub actions: Vec<ActionPayload<'a>>,
    /// Return source, if the command declared one
    pub returns: Option<&'a ValueSource>,
}

/// One ordered action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionPayload<'a> {
    /// Position in the sequence
    pub position: usize,
    pub result: &'a str,
    pub operation: &'a str,
    pub kind: OperationKind,
    pub sources: &'a [ValueSource],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Call,
    Assign,
}

impl<'a> SequencePayload<'a> {
    pub fn from_sequence(sequence: &'a Sequence) -> Self {
        Self {
            actions: sequence
                .actions()
                .iter()
                .enumerate()
                .map(|(position, action)| ActionPayload::new(position, action))
                .collect(),
            returns: sequence.returns(),
        }
    }
}

impl<'a> ActionPayload<'a> {
    fn new(position: usize, action: &'a Action) -> Self {
        let kind = match action.operation() {
            Operation::Call(_) => OperationKind::Call,
            Operation::Assign => OperationKind::Assign,
        };
        Self {
            position,
            result: action.result().name(),
            operation: action.operation().name(),
            kind,
            sources: action.sources(),
        }
    }
}

// ============================================================
// RENDERER
// ============================================================

/// Renders a sequence as JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn compact() -> Self {
        Self::new(false)
    }

    pub fn pretty() -> Self {
        Self::new(true)
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl SequenceRenderer for JsonRenderer {
    fn render(&self, sequence: &Sequence) -> Result<String, ConversionError> {
        let payload = SequencePayload::from_sequence(sequence);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&payload)
        } else {
            serde_json::to_string(&payload)
        };
        rendered.map_err(|e| ConversionError::Render(e.to_string()))
    }
}
