use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::DEFAULT_REGIMEN_FILE;

/// Environment variable overriding `regimen_file`
pub const ENV_REGIMEN_FILE: &str = "DOSEL_REGIMEN_FILE";
/// Environment variable overriding `strict_alerts`
pub const ENV_STRICT_ALERTS: &str = "DOSEL_STRICT_ALERTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

/// Shell settings: file values, then environment, then command-line flags.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON regimen store
    pub regimen_file: PathBuf,
    /// Fail CALCULATE/ADJUST commands whose result carries a safety alert
    pub strict_alerts: bool,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regimen_file: PathBuf::from(DEFAULT_REGIMEN_FILE),
            strict_alerts: false,
            output: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {name} (expected true or false)")]
    InvalidEnv { name: &'static str, value: String },
}

impl Config {
    /// Looked up in the working directory when no `--config` is given
    pub const FILE_NAME: &'static str = "dosel.toml";

    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `explicit`, which must exist, or `dosel.toml` if present, or
    /// falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(Self::FILE_NAME);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        debug!("loading config from {}", path.display());
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &path)
    }

    /// Applies `DOSEL_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides using `lookup` to read variables.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_REGIMEN_FILE).filter(|p| !p.is_empty()) {
            self.regimen_file = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_STRICT_ALERTS) {
            self.strict_alerts = parse_flag(&value).ok_or(ConfigError::InvalidEnv {
                name: ENV_STRICT_ALERTS,
                value,
            })?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
