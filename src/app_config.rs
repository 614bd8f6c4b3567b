use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::DatabaseConnection;

/// Application configuration module
/// This module handles loading, validating and saving the settings the
/// `isoref` binary reads from its JSON config file.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file; the platform data directory when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// iso-codes `iso_3166-1.json` file used by `seed`
    #[serde(default = "default_countries_file")]
    pub countries_file: PathBuf,

    /// iso-codes `iso_639-2.json` file used by `seed`
    #[serde(default = "default_languages_file")]
    pub languages_file: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_countries_file() -> PathBuf {
    PathBuf::from("data/iso_3166-1.json")
}

fn default_languages_file() -> PathBuf {
    PathBuf::from("data/iso_639-2.json")
}

impl Config {
    /// Load the config file, or write and return defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::warn!(
                "Config file not found at '{}', creating default config.",
                path.display()
            );
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the config as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.database_path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("database_path must not be empty when set"));
            }
            if path.is_dir() {
                return Err(anyhow!(
                    "database_path points at a directory: {}",
                    path.display()
                ));
            }
        }

        if self.countries_file.as_os_str().is_empty() {
            return Err(anyhow!("countries_file must not be empty"));
        }

        if self.languages_file.as_os_str().is_empty() {
            return Err(anyhow!("languages_file must not be empty"));
        }

        Ok(())
    }

    /// Database path to open, falling back to the platform data directory
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DatabaseConnection::default_database_path()
                .context("Failed to determine default database path"),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            countries_file: default_countries_file(),
            languages_file: default_languages_file(),
            log_level: LogLevel::default(),
        }
    }
}
