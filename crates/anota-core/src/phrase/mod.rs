//! Free-text phrase interpretation.

mod interpreter;
pub mod rules;

pub use interpreter::{PhraseInterpreter, DEFAULT_UTC_OFFSET_MINUTES};

use crate::error::InterpretError;

/// Result type for interpretation.
pub type Result<T> = std::result::Result<T, InterpretError>;
