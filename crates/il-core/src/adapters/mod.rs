//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound `SequenceRenderer` port.

mod json_renderer;
mod text_renderer;

pub use json_renderer::{ActionPayload, JsonRenderer, OperationKind, SequencePayload};
pub use text_renderer::TextRenderer;
