//! Collaborator boundaries and message orchestration.
//!
//! Transport, the chat directory and the ledger backend are traits; the
//! [`MessageHandler`] wires them to the phrase interpreter. Implementations
//! take `&self` and use interior mutability so one handler can serve
//! several threads.

mod directory;
mod handler;
mod memory;
pub mod replies;

pub use directory::{CachedDirectory, MemoryDirectory};
pub use handler::{ChatCommand, HandleOutcome, MessageHandler};
pub use memory::{MemoryLedger, RecordingSender};

use crate::error::CollaboratorError;
use crate::models::record::{LedgerLocation, LedgerRow, TransactionRecord};

/// Result type for collaborator calls.
pub type Result<T> = std::result::Result<T, CollaboratorError>;

/// Outbound chat transport.
pub trait MessageSender {
    /// Send `text` to `chat_id`.
    fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

/// Chat identity to ledger location directory.
pub trait LedgerDirectory {
    /// Ledger location assigned to `chat_id`, if any.
    fn resolve(&self, chat_id: &str) -> Result<Option<LedgerLocation>>;

    /// Assign `location` to `chat_id`, replacing any previous assignment.
    fn register(&self, chat_id: &str, location: LedgerLocation) -> Result<()>;
}

/// Append-only ledger backend.
pub trait LedgerStore {
    /// Append one record as a row at `location`.
    fn append_row(&self, location: &LedgerLocation, record: &TransactionRecord) -> Result<()>;

    /// All rows at `location`, oldest first.
    fn list_rows(&self, location: &LedgerLocation) -> Result<Vec<LedgerRow>>;
}
