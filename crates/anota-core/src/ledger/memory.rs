//! In-memory ledger and transport.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use crate::models::record::{LedgerLocation, LedgerRow, TransactionRecord};

use super::{LedgerStore, MessageSender, Result};

/// Ledger kept in memory, keyed by location.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    tables: RwLock<HashMap<LedgerLocation, Vec<LedgerRow>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows across all locations.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerStore for MemoryLedger {
    fn append_row(&self, location: &LedgerLocation, record: &TransactionRecord) -> Result<()> {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(location.clone())
            .or_default()
            .push(record.to_row());
        Ok(())
    }

    fn list_rows(&self, location: &LedgerLocation) -> Result<Vec<LedgerRow>> {
        Ok(self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .cloned()
            .unwrap_or_default())
    }
}

/// Transport that keeps every message instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(chat_id, text)` sent so far, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Text of the most recent message.
    pub fn last_text(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|(_, text)| text.clone())
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<(String, String)> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl MessageSender for RecordingSender {
    fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}
