//! Errors raised while locating, reading or writing `config.yml`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file path not set")]
    FilePathNotSet,

    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but could not be read.
    #[error("Failed to read configuration from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but is not valid YAML for the expected fields.
    #[error("Invalid configuration in {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to write configuration to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    SerializationFailed(#[from] serde_yaml::Error),
}
