//! Ports module for the IL converter
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::ConversionApi;
pub use outbound::SequenceRenderer;
