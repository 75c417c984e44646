//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the API endpoint, fetch timing, logging level and message overrides.

mod error;

pub use error::ConfigError;

use crate::api::DEFAULT_ENDPOINT;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/character-browser";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub endpoint: String,
    pub fetch_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub connectivity_timeout_ms: u64,
    pub retry_attempts: usize,
    pub log_level: String,
    pub messages: HashMap<String, String>, // message key -> text
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connectivity_timeout_ms")]
    pub connectivity_timeout_ms: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_fetch_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connectivity_timeout_ms() -> u64 {
    1500
}

fn default_retry_attempts() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            endpoint: default_endpoint(),
            fetch_delay_ms: default_fetch_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            connectivity_timeout_ms: default_connectivity_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            log_level: default_log_level(),
            messages: HashMap::new(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. If no file exists yet, write one holding the
    /// current values to the default directory or the custom one.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if !file_path.exists() {
            return self.save();
        }

        let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::ReadFailed {
            path: file_path.clone(),
            source: e,
        })?;
        let data: FileSpec =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseFailed {
                path: file_path.clone(),
                source: e,
            })?;
        self.endpoint = data.endpoint;
        self.fetch_delay_ms = data.fetch_delay_ms;
        self.request_timeout_secs = data.request_timeout_secs;
        self.connectivity_timeout_ms = data.connectivity_timeout_ms;
        self.retry_attempts = data.retry_attempts;
        self.log_level = data.log_level;
        self.messages = data.messages;
        Ok(())
    }

    /// Serialize the current configuration and write it to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            endpoint: self.endpoint.clone(),
            fetch_delay_ms: self.fetch_delay_ms,
            request_timeout_secs: self.request_timeout_secs,
            connectivity_timeout_ms: self.connectivity_timeout_ms,
            retry_attempts: self.retry_attempts,
            log_level: self.log_level.clone(),
            messages: self.messages.clone(),
        };
        let content = serde_yaml::to_string(&data).map_err(ConfigError::from)?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connectivity_timeout(&self) -> Duration {
        Duration::from_millis(self.connectivity_timeout_ms)
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
