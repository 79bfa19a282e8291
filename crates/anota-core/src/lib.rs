//! Core library for turning free-form Portuguese chat messages into
//! ledger rows.
//!
//! This crate provides:
//! - Text normalization and field extraction (amount, date, payment method,
//!   installments, category, description)
//! - The [`PhraseInterpreter`] combining them into a [`TransactionRecord`]
//! - Collaborator traits for transport, chat directory and ledger storage
//! - The [`MessageHandler`] routing chat messages to the ledger

pub mod error;
pub mod ledger;
pub mod models;
pub mod phrase;

pub use error::{AnotaError, CollaboratorError, InterpretError, Result, VocabularyError};
pub use ledger::{
    CachedDirectory, ChatCommand, HandleOutcome, LedgerDirectory, LedgerStore, MemoryDirectory,
    MemoryLedger, MessageHandler, MessageSender, RecordingSender,
};
pub use models::config::AnotaConfig;
pub use models::record::{
    Group, InstallmentCondition, LedgerLocation, LedgerRow, PaymentMethod, TransactionRecord,
    TransactionType, LEDGER_COLUMNS,
};
pub use models::vocabulary::Vocabulary;
pub use phrase::PhraseInterpreter;
