//! Schema Extraction CLI
//!
//! Extracts schemas from DTO declaration files and writes the persisted
//! JSON schema set.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use signet_schemas::config::{OutputFormat, SignetConfig};
use signet_schemas::{extract_many, names};

#[derive(Parser)]
#[command(name = "schema-extract")]
#[command(about = "Extract schemas from DTO declaration files")]
struct Cli {
    /// Logical schema names to extract (e.g. "author bookShelf")
    names: Vec<String>,

    /// Root directory holding declaration files
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Discover every *.dto.ts declaration under the root
    #[arg(long, conflicts_with = "names")]
    all: bool,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Path to a config file (signet.toml)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SignetConfig::load_from(cli.config.as_deref())?;
    let root = cli.root.unwrap_or(config.extract.root);

    let logical_names = if cli.all {
        discover_logical_names(&root)?
    } else {
        cli.names
    };
    if logical_names.is_empty() {
        bail!("no schema names given (pass logical names or --all)");
    }

    let set = extract_many(&root, &logical_names)
        .with_context(|| format!("extraction failed under {}", root.display()))?;

    let compact = cli.compact || config.output.format == OutputFormat::Compact;
    let json = if compact {
        set.to_json_string()?
    } else {
        set.to_json_string_pretty()?
    };

    match cli.output.or(config.output.path) {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} schemas to {}", set.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Walk the root for `*.dto.ts` files and derive their logical names
fn discover_logical_names(root: &Path) -> anyhow::Result<Vec<String>> {
    let mut logical_names = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(location) = file_name.strip_suffix(".ts") {
            if location.ends_with(".dto") {
                logical_names.push(names::logical_name(location));
            }
        }
    }
    logical_names.sort();
    logical_names.dedup();
    Ok(logical_names)
}
