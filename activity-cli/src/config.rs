use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "ACTIVITY_LOGGER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Print the nearest deadline after the task listing.
    pub show_next_due: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing-subscriber filter directive, used when ACTIVITY_LOGGER_LOG is unset.
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// `~/.activity-logger`. Never created; the app only reads from it.
pub fn app_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".activity-logger"))
}

pub fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(p) if !p.is_empty() => Some(PathBuf::from(p)),
        _ => app_home().map(|home| home.join("config.toml")),
    }
}

pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(p) => load_config_from(&p),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", path.display()))
}

/// Startup log message describing where the active configuration came from.
pub fn config_source(path: Option<&Path>) -> &'static str {
    match path {
        Some(p) if p.exists() => "configuration loaded",
        Some(_) => "no config file, using defaults",
        None => "HOME not set, using default configuration",
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}
