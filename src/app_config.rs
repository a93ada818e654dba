use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the modular artworks and their scripts
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory receiving the standalone artworks
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Appended to the input file stem to name the output
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./modular/")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./standalone/")
}

fn default_output_suffix() -> String {
    "_Standalone".to_string()
}

impl Config {
    /// Load the configuration from a JSON file, falling back to defaults when absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .context(format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(ConfigError::SuffixWithSeparator(self.output_suffix.clone()));
        }

        // A standalone copy must never land on its modular source
        if same_directory(&self.input_dir, &self.output_dir) {
            return Err(ConfigError::SameDirectories(self.input_dir.clone()));
        }

        Ok(())
    }
}

// @compares: Directories, resolving them when they exist
fn same_directory(left: &Path, right: &Path) -> bool {
    match (left.canonicalize(), right.canonicalize()) {
        (Ok(left), Ok(right)) => left == right,
        _ => left.components().eq(right.components()),
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            output_suffix: default_output_suffix(),
            log_level: LogLevel::default(),
        }
    }
}
