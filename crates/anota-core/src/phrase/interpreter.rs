//! Phrase interpreter: runs the extractor cascade and assembles a record.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use tracing::debug;

use crate::error::{AnotaError, InterpretError};
use crate::models::config::InterpreterConfig;
use crate::models::record::TransactionRecord;
use crate::models::vocabulary::Vocabulary;

use super::rules::{
    description::DEFAULT_MAX_CHARS, normalize, AmountExtractor, CategoryClassifier,
    DateExtractor, DescriptionExtractor, FieldExtractor, InstallmentExtractor,
    PaymentMethodExtractor,
};
use super::Result;

/// Brasília time, UTC-3.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;

/// Turns one chat message into a [`TransactionRecord`].
///
/// Stateless apart from its read-only vocabulary: safe to share across
/// threads and call concurrently.
#[derive(Debug, Clone)]
pub struct PhraseInterpreter {
    vocabulary: Vocabulary,
    utc_offset: FixedOffset,
    description_max_chars: usize,
}

impl PhraseInterpreter {
    /// Interpreter with the embedded vocabulary and Brasília time.
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::embedded().clone(),
            utc_offset: FixedOffset::west_opt(3 * 3600).unwrap_or_else(|| Utc.fix()),
            description_max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Build from configuration, loading an external vocabulary if set.
    pub fn from_config(config: &InterpreterConfig) -> crate::Result<Self> {
        let vocabulary = Vocabulary::load(config.vocabulary_path.as_deref())?;
        let utc_offset = FixedOffset::east_opt(config.utc_offset_minutes * 60).ok_or_else(|| {
            AnotaError::Config(format!(
                "utc_offset_minutes out of range: {}",
                config.utc_offset_minutes
            ))
        })?;

        Ok(Self {
            vocabulary,
            utc_offset,
            description_max_chars: config.description_max_chars,
        })
    }

    /// Replace the vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Set the offset used to compute the receipt date.
    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Set the description length limit.
    pub fn with_description_max_chars(mut self, max_chars: usize) -> Self {
        self.description_max_chars = max_chars;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Current date at the configured offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }

    /// Interpret a message received now.
    pub fn interpret(&self, text: &str) -> Result<TransactionRecord> {
        self.interpret_on(text, self.today())
    }

    /// Interpret a message received on `received_on`.
    ///
    /// Fails only when no amount is found; every other field has a default.
    pub fn interpret_on(&self, text: &str, received_on: NaiveDate) -> Result<TransactionRecord> {
        let normalized = normalize(text);

        let amount = AmountExtractor::new()
            .extract(&normalized)
            .ok_or(InterpretError::MissingAmount)?;
        debug!("amount {} from {:?}", amount.value, amount.source);

        let date = DateExtractor::new(received_on).resolve(&normalized);

        let classifier = CategoryClassifier::new(&self.vocabulary);
        let forced = classifier.force_group(&normalized);
        let classification = classifier.classify(&normalized);
        let group = forced.map(|f| f.group).unwrap_or(classification.group);
        debug!(
            "category {} (keyword {:?}), group {} (forced: {})",
            classification.category,
            classification.keyword,
            group,
            forced.is_some()
        );

        let payment_method = PaymentMethodExtractor::new().classify(&normalized);
        let installment = InstallmentExtractor::new().detect(&normalized);

        let description = DescriptionExtractor::new(&self.vocabulary)
            .with_max_chars(self.description_max_chars)
            .extract(&normalized, classification.keyword.as_deref());
        debug!(
            "date {}, payment {}, installment {}, description {:?}",
            date, payment_method, installment, description
        );

        Ok(TransactionRecord::new(
            date,
            group,
            classification.category,
            description,
            amount.value,
            payment_method,
            installment,
        ))
    }
}

impl Default for PhraseInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
