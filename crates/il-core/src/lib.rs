//! # il-core: Intermediate Language Engine
//!
//! Builds programs out of named actions and linearizes them into a
//! dependency-valid sequence using a stable Kahn topological sort.
//!
//! ## Architecture
//!
//! - **Domain**: Identifiers, value sources, actions, commands, dependency graph, sequence
//! - **Algorithms**: Dependency building, Kahn's sort with cycle extraction
//! - **Ports**: Inbound (ConversionApi) and Outbound (SequenceRenderer)
//! - **Application**: Converter orchestration
//! - **Adapters**: Text and JSON renderers
//!
//! ## Example
//!
//! ```
//! use il_core::{ActionTemplate, ComplexCommand, ConversionApi, Converter, Identifier,
//!     ValueSource, VectorSimpleCommand};
//!
//! let a1 = ActionTemplate::new("A1")?;
//! let a2 = ActionTemplate::new("A2")?;
//! let x1 = Identifier::new("X1")?;
//! let x2 = Identifier::new("X2")?;
//!
//! let mut program = VectorSimpleCommand::new();
//! program.add(a2.call(x2, vec![ValueSource::from(&x1)]))?;
//! program.add(a1.call(x1, vec![ValueSource::input()]))?;
//!
//! let sequence = Converter::new().convert(&ComplexCommand::new(program)?)?;
//! assert_eq!(sequence.render(), "X1 = A1(input);\nX2 = A2(X1);\n");
//! # Ok::<(), il_core::ConversionError>(())
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{JsonRenderer, TextRenderer};
pub use application::Converter;
pub use config::ConverterConfig;
pub use domain::entities::*;
pub use domain::errors::ConversionError;
pub use domain::value_objects::*;
pub use ports::inbound::ConversionApi;
pub use ports::outbound::SequenceRenderer;
