//! File-backed collaborators used by the command line.
//!
//! The chat directory is a JSON object mapping chat ids to ledger
//! locations. Each ledger location is a CSV file under the data directory
//! whose first line is the ledger header.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};
use tracing::debug;

use anota_core::ledger::{LedgerDirectory, LedgerStore, MessageSender, Result};
use anota_core::models::record::{LedgerLocation, LedgerRow, TransactionRecord, LEDGER_COLUMNS};
use anota_core::CollaboratorError;

/// Chat directory stored as a JSON file.
pub struct JsonDirectory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// All registered chats, sorted by id.
    pub fn entries(&self) -> Result<BTreeMap<String, LedgerLocation>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl LedgerDirectory for JsonDirectory {
    fn resolve(&self, chat_id: &str) -> Result<Option<LedgerLocation>> {
        Ok(self.entries()?.remove(chat_id))
    }

    fn register(&self, chat_id: &str, location: LedgerLocation) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.entries()?;
        entries.insert(chat_id.to_string(), location);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!("directory {} now has {} chats", self.path.display(), entries.len());
        Ok(())
    }
}

/// Ledger stored as one CSV file per location.
pub struct CsvLedger {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLedger {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// File backing `location`.
    ///
    /// The readable part is lossy, so the name ends with a digest of the
    /// exact location to keep distinct locations in distinct files.
    pub fn file_for(&self, location: &LedgerLocation) -> PathBuf {
        self.root.join(format!(
            "{}__{}__{}-{}.csv",
            slug(&location.path),
            slug(&location.worksheet),
            slug(&location.table),
            location_digest(location)
        ))
    }
}

/// First 8 bytes of the SHA-256 of the location parts, as hex.
fn location_digest(location: &LedgerLocation) -> String {
    let mut hasher = Sha256::new();
    for part in [&location.path, &location.worksheet, &location.table] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    let result = hasher.finalize();

    result[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

fn slug(s: &str) -> String {
    let slug: String = s
        .trim_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if slug.is_empty() { "_".to_string() } else { slug }
}

fn csv_error(err: csv::Error) -> CollaboratorError {
    CollaboratorError::Serialization(err.to_string())
}

impl LedgerStore for CsvLedger {
    fn append_row(&self, location: &LedgerLocation, record: &TransactionRecord) -> Result<()> {
        let path = self.file_for(location);
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        fs::create_dir_all(&self.root)?;
        let is_new = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(LEDGER_COLUMNS).map_err(csv_error)?;
        }
        writer.write_record(record.to_row().cells()).map_err(csv_error)?;
        writer.flush()?;

        debug!("appended row to {}", path.display());
        Ok(())
    }

    fn list_rows(&self, location: &LedgerLocation) -> Result<Vec<LedgerRow>> {
        read_rows(&self.file_for(location))
    }
}

fn read_rows(path: &Path) -> Result<Vec<LedgerRow>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    reader
        .records()
        .map(|record| {
            record
                .map(|r| LedgerRow::new(r.iter().map(String::from).collect()))
                .map_err(csv_error)
        })
        .collect()
}

/// Prints replies to stdout.
pub struct ConsoleSender;

impl MessageSender for ConsoleSender {
    fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        debug!("reply to chat {}", chat_id);
        println!("{}", text);
        Ok(())
    }
}
