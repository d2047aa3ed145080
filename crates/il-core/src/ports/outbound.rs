//! Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::Sequence;
use crate::domain::errors::ConversionError;

/// Produces the external printable form of a sequence.
///
/// Implementations must be deterministic: the same sequence always renders
/// to the same bytes.
pub trait SequenceRenderer: Send + Sync {
    fn render(&self, sequence: &Sequence) -> Result<String, ConversionError>;
}
