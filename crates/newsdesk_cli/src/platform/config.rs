//! On-disk CLI configuration.
//!
//! Precedence, highest first: command-line flags and their environment
//! variables, then the RON config file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use newsdesk_client::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "newsdesk.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub api_url: String,
    pub state_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub log_level: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            state_dir: PathBuf::from("."),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            log_destination: LogDestination::default(),
            log_level: None,
        }
    }
}

impl CliConfig {
    /// Loads `path`, or `./newsdesk.ron` when no path is given.
    ///
    /// An explicit path must exist; the implicit default may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::with_base_url(self.api_url.clone())
        }
    }
}
