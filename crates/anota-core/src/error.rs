//! Error types for the anota-core library.

use thiserror::Error;

/// Main error type for the anota library.
#[derive(Error, Debug)]
pub enum AnotaError {
    /// Phrase interpretation error.
    #[error("interpretation error: {0}")]
    Interpret(#[from] InterpretError),

    /// Error reported by a directory, ledger or transport collaborator.
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Classifier vocabulary could not be loaded.
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors produced while interpreting a phrase.
///
/// The `Display` text is shown verbatim to the chat user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// No positive monetary value was found in the message.
    #[error("Não encontrei o valor na mensagem.")]
    MissingAmount,
}

/// Errors reported by external collaborators.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The chat has no ledger location assigned.
    #[error("chat {0} is not registered")]
    NotRegistered(String),

    /// The backing service rejected the request.
    #[error("backend failure ({code}): {message}")]
    Backend { code: u16, message: String },

    /// Local storage failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CollaboratorError {
    /// Shorthand for a backend failure.
    pub fn backend(code: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            code,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CollaboratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors related to classifier vocabulary tables.
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// The table document is not valid JSON for the expected shape.
    #[error("failed to parse vocabulary: {0}")]
    Parse(String),

    /// The table has no category entries.
    #[error("vocabulary has no category entries")]
    Empty,

    /// An entry has an empty keyword or token.
    #[error("empty {kind} at position {index}")]
    EmptyEntry { kind: &'static str, index: usize },
}

/// Result type for the anota library.
pub type Result<T> = std::result::Result<T, AnotaError>;
