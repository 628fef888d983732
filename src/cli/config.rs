//! Configuration file for the clinic session
//!
//! JSON, every field optional:
//!
//! ```json
//! { "data_file": "patient_data.txt", "load_on_start": true, "log_level": "WARN" }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::observability::Severity;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Export file used by load and save (default "patient_data.txt")
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Scan the export file when the session starts (default true)
    #[serde(default = "default_load_on_start")]
    pub load_on_start: bool,

    /// Minimum log severity (default "WARN")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_file() -> String {
    "patient_data.txt".to_string()
}
fn default_load_on_start() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            load_on_start: default_load_on_start(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        self.severity()?;

        Ok(())
    }

    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_file)
    }
}
