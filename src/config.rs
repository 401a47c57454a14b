//! Configuration for the CLI tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (signet.toml)
//! - Environment variables (SIGNET_*)
//!
//! ## Example config file (signet.toml):
//! ```toml
//! [extract]
//! root = "./dto"
//!
//! [output]
//! format = "pretty"
//! path = "schemas.json"
//! ```
//!
//! Only the tool surface is configurable. The naming conventions that map
//! logical names to interfaces and source locations are fixed.

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the schema tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignetConfig {
    /// Extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Root directory holding declaration files
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Default output file for extracted schema sets
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl SignetConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for location in ["signet.toml", ".signet.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SIGNET")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SignetConfig::default();
        assert_eq!(config.extract.root, PathBuf::from("."));
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = SignetConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let reloaded: SignetConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(reloaded.extract.root, config.extract.root);
    }
}
