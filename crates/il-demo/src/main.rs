//! # IL Demo
//!
//! Declares a two-action program out of order, converts it and prints the
//! result in both renderings.
//!
//! ```text
//! X2 = A2(X1);      converts to      X1 = A1(input);
//! X1 = A1(input);                    X2 = A2(X1);
//! ```
//!
//! Set `IL_CONFIG` to a JSON file to override `ConverterConfig`, and
//! `RUST_LOG` to change log verbosity.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use il_core::{
    ActionTemplate, ComplexCommand, ConversionApi, Converter, ConverterConfig, Identifier,
    JsonRenderer, TextRenderer, ValueSource, VectorSimpleCommand,
};

/// Demo settings: converter limits plus output style.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    #[serde(flatten)]
    converter: ConverterConfig,
    /// Indent the JSON rendering
    pretty_json: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            converter: ConverterConfig::default(),
            pretty_json: true,
        }
    }
}

fn load_config() -> Result<DemoConfig> {
    match std::env::var("IL_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            let config = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path))?;
            info!(path = %path, "Loaded converter config");
            Ok(config)
        }
        Err(_) => Ok(DemoConfig::default()),
    }
}

fn build_program() -> Result<ComplexCommand> {
    let a1 = ActionTemplate::new("A1")?;
    let a2 = ActionTemplate::new("A2")?;
    let x1 = Identifier::new("X1")?;
    let x2 = Identifier::new("X2")?;

    let mut program = VectorSimpleCommand::new();
    program.add(a2.call(x2.clone(), vec![ValueSource::from(&x1)]))?;
    program.add(a1.call(x1, vec![ValueSource::input()]))?;
    program.returning(&x2)?;

    Ok(ComplexCommand::new(program)?)
}

fn main() -> Result<()> {
    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config()?;
    let converter = Converter::with_config(config.converter);

    let program = build_program()?;
    println!("-- declared --\n{}", program);

    let sequence = converter
        .convert(&program)
        .context("converting example program")?;

    println!("-- sequence --\n{}", sequence.render_with(&TextRenderer)?);
    println!(
        "-- json --\n{}",
        sequence.render_with(&JsonRenderer::new(config.pretty_json))?
    );

    Ok(())
}
