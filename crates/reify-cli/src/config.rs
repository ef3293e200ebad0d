//! CLI configuration (reify.toml)
//!
//! Every section and field is optional; missing values fall back to defaults
//! and command-line flags override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "reify.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How descriptors are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per type
    #[default]
    Pretty,
    /// Indented call tree
    Tree,
    /// JSON document
    Json,
}

/// `[output]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Object runtime helpers are called on (e.g. "$rt")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// `[log]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Parsed reify.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReifyConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl ReifyConfig {
    /// Parse config from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Load the explicit config, else `reify.toml` in `dir` if present, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReifyConfig::from_str("").unwrap();
        assert_eq!(config, ReifyConfig::default());
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert_eq!(config.output.namespace, None);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_full_config() {
        let config = ReifyConfig::from_str(
            r#"
[output]
format = "tree"
namespace = "$rt"

[log]
filter = "reify_compiler=trace"
"#,
        )
        .unwrap();
        assert_eq!(config.output.format, OutputFormat::Tree);
        assert_eq!(config.output.namespace.as_deref(), Some("$rt"));
        assert_eq!(config.log.filter, "reify_compiler=trace");
    }

    #[test]
    fn test_invalid_format() {
        let err = ReifyConfig::from_str("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            ReifyConfig::discover(None, dir.path()).unwrap(),
            ReifyConfig::default()
        );

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[output]\nformat = \"json\"\n")
            .unwrap();
        let found = ReifyConfig::discover(None, dir.path()).unwrap();
        assert_eq!(found.output.format, OutputFormat::Json);

        let missing = dir.path().join("missing.toml");
        let err = ReifyConfig::discover(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
