//! Schema Validation CLI
//!
//! Validates a JSON value against a type signature, resolving named
//! references in a persisted schema set.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use signet_schemas::{parse, SchemaSet};

#[derive(Parser)]
#[command(name = "schema-validate")]
#[command(about = "Validate a JSON value against a type signature")]
struct Cli {
    /// Type signature to validate against (e.g. "book[]" or "string | null")
    #[arg(short = 't', long = "type")]
    signature: String,

    /// Persisted schema set (JSON file) for named references
    #[arg(short, long)]
    schemas: Option<PathBuf>,

    /// JSON value file (stdin if omitted)
    value: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let schemas = match &cli.schemas {
        Some(path) => SchemaSet::load(path)
            .with_context(|| format!("failed to load schema set {}", path.display()))?,
        None => SchemaSet::new(),
    };

    let raw = match &cli.value {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let value: serde_json::Value = serde_json::from_str(&raw).context("value is not JSON")?;

    match parse(&value, &cli.signature, &schemas) {
        Ok(parsed) => {
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Invalid: {}", e);
            if let Some(schema) = e.schema_context() {
                eprintln!("  schema: {}", schema);
            }
            if let Some(property) = e.property_context() {
                eprintln!(
                    "  property: {} ({}{})",
                    property.name,
                    property.signature,
                    if property.optional { ", optional" } else { "" }
                );
            }
            std::process::exit(1);
        }
    }
}
