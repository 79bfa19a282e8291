//! Data models for transaction records, configuration and vocabulary.

pub mod config;
pub mod record;
pub mod vocabulary;
