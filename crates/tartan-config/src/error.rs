//! Error types for snapshot loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a snapshot file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML
    #[error("failed to parse YAML in {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Secret not found
    #[error("secret '{key}' not found in secrets.yaml")]
    SecretNotFound { key: String },

    /// Environment variable not found
    #[error("environment variable '{var}' not set")]
    EnvVarNotFound { var: String },

    /// Include file not found
    #[error("included file not found: {path}")]
    IncludeNotFound { path: PathBuf },

    /// Circular include detected
    #[error("circular include detected: {path}")]
    CircularInclude { path: PathBuf },

    /// Invalid tag argument or unsupported tag
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// The document is not a mapping of field names to values
    #[error("snapshot in {path} must be a mapping")]
    NotAMapping { path: PathBuf },

    /// The document could not be represented as a raw snapshot
    #[error("failed to convert snapshot in {path}: {source}")]
    Convert {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
