//! Configuration structures for the expense logger.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::phrase::rules::description::DEFAULT_MAX_CHARS;
use crate::phrase::DEFAULT_UTC_OFFSET_MINUTES;

/// Main configuration for anota.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnotaConfig {
    /// Phrase interpretation configuration.
    pub interpreter: InterpreterConfig,

    /// Local storage configuration.
    pub storage: StorageConfig,

    /// Chat reply configuration.
    pub messages: MessagesConfig,
}

/// Phrase interpreter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// External vocabulary file replacing the embedded tables.
    pub vocabulary_path: Option<PathBuf>,

    /// Offset from UTC, in minutes, used to decide what "today" is.
    pub utc_offset_minutes: i32,

    /// Maximum description length in characters.
    pub description_max_chars: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            vocabulary_path: None,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            description_max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Where the directory file and ledgers are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for local data.
    pub data_dir: PathBuf,

    /// File name of the chat directory, relative to `data_dir`.
    pub directory_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            directory_file: "directory.json".to_string(),
        }
    }
}

/// Chat reply configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Rows listed by the recent-rows command.
    pub recent_rows: usize,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self { recent_rows: 5 }
    }
}

impl AnotaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Full path of the chat directory file.
    pub fn directory_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.directory_file)
    }
}
