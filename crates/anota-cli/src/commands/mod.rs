//! Subcommands and the wiring they share.

pub mod batch;
pub mod config;
pub mod directory;
pub mod interpret;
pub mod log;

use std::path::{Path, PathBuf};

use tracing::debug;

use anota_core::models::config::AnotaConfig;
use anota_core::{CachedDirectory, LedgerDirectory, MessageHandler, MessageSender, PhraseInterpreter};

use crate::local::{CsvLedger, JsonDirectory};

/// Platform location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("anota")
        .join("config.json")
}

/// Load the configuration named on the command line, else the default
/// file if it exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<AnotaConfig> {
    if let Some(path) = config_path {
        debug!("loading config from {}", path);
        return Ok(AnotaConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("loading config from {}", default_path.display());
        Ok(AnotaConfig::from_file(&default_path)?)
    } else {
        Ok(AnotaConfig::default())
    }
}

pub fn open_directory(config: &AnotaConfig) -> CachedDirectory<JsonDirectory> {
    CachedDirectory::new(JsonDirectory::new(config.directory_path()))
}

pub fn open_ledger(config: &AnotaConfig) -> CsvLedger {
    CsvLedger::new(config.storage.data_dir.join("ledgers"))
}

/// Handler over local storage, replying through `sender`.
pub fn build_handler<S: MessageSender>(
    config: &AnotaConfig,
    sender: S,
) -> anyhow::Result<MessageHandler<S, CachedDirectory<JsonDirectory>, CsvLedger>> {
    let interpreter = PhraseInterpreter::from_config(&config.interpreter)?;
    Ok(
        MessageHandler::new(interpreter, sender, open_directory(config), open_ledger(config))
            .with_recent_rows(config.messages.recent_rows),
    )
}

/// Fail unless `chat_id` has a ledger location.
pub fn require_registered(
    directory: &impl LedgerDirectory,
    chat_id: &str,
) -> anyhow::Result<anota_core::LedgerLocation> {
    directory
        .resolve(chat_id)?
        .ok_or_else(|| anota_core::CollaboratorError::NotRegistered(chat_id.to_string()).into())
}
