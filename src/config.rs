use crate::defaults;
use crate::error::{LibrittsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub sql: SqlConfig,
    pub audio: AudioConfig,
}

/// SQL emission configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SqlConfig {
    /// Transcription rows per chunk file.
    pub chunk_size: usize,
    /// Name used in script headers.
    pub database_name: String,
}

/// Audio transcoding configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AudioConfig {
    pub transcoder: String,
    pub codec: String,
    pub extension: String,
    pub quality: u8,
    pub jobs: usize,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            database_name: defaults::DATABASE_NAME.to_string(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            transcoder: defaults::TRANSCODER.to_string(),
            codec: defaults::CODEC.to_string(),
            extension: defaults::EXTENSION.to_string(),
            quality: defaults::QUALITY,
            jobs: defaults::JOBS,
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_number<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_value(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| LibrittsError::ConfigParse {
                message: format!("{}: {}", path.display(), e),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - LIBRITTS_DB_CHUNK_SIZE → sql.chunk_size
    /// - LIBRITTS_DB_TRANSCODER → audio.transcoder
    /// - LIBRITTS_DB_QUALITY → audio.quality
    /// - LIBRITTS_DB_JOBS → audio.jobs
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(chunk_size) = env_number("LIBRITTS_DB_CHUNK_SIZE") {
            self.sql.chunk_size = chunk_size;
        }

        if let Some(transcoder) = env_value("LIBRITTS_DB_TRANSCODER") {
            self.audio.transcoder = transcoder;
        }

        if let Some(quality) = env_number("LIBRITTS_DB_QUALITY") {
            self.audio.quality = quality;
        }

        if let Some(jobs) = env_number("LIBRITTS_DB_JOBS") {
            self.audio.jobs = jobs;
        }

        self
    }

    /// Reject values no run can succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.sql.chunk_size == 0 {
            return Err(invalid("sql.chunk_size", "must be at least 1"));
        }
        if self.audio.jobs == 0 {
            return Err(invalid("audio.jobs", "must be at least 1"));
        }
        if self.audio.transcoder.trim().is_empty() {
            return Err(invalid("audio.transcoder", "must not be empty"));
        }
        if self.audio.extension.trim().is_empty() {
            return Err(invalid("audio.extension", "must not be empty"));
        }
        Ok(())
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LibrittsError::Other(e.to_string()))
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/libritts-db/config.toml on Linux, or a relative
    /// `libritts-db/config.toml` when no config directory is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_default()
            .join("libritts-db")
            .join("config.toml")
    }
}

fn invalid(key: &str, message: &str) -> LibrittsError {
    LibrittsError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
