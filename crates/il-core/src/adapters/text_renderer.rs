//! Text Renderer Adapter
//!
//! One line per action in final order, then the return value:
//!
//! ```text
//! X1 = A1(input);
//! X2 = A2(X1);
//! return X2;
//! ```

use crate::domain::entities::Sequence;
use crate::domain::errors::ConversionError;
use crate::ports::outbound::SequenceRenderer;

/// Renders the listing produced by `Sequence`'s `Display` impl.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl SequenceRenderer for TextRenderer {
    fn render(&self, sequence: &Sequence) -> Result<String, ConversionError> {
        Ok(sequence.to_string())
    }
}
