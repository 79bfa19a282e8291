//! Rule-based field extractors for Portuguese expense phrases.

pub mod normalize;
pub mod patterns;
pub mod amounts;
pub mod dates;
pub mod payment;
pub mod installments;
pub mod category;
pub mod description;

pub use normalize::normalize;
pub use amounts::{parse_brl_amount, format_brl_amount, AmountExtractor};
pub use dates::DateExtractor;
pub use payment::PaymentMethodExtractor;
pub use installments::InstallmentExtractor;
pub use category::{CategoryClassifier, Classification};
pub use description::{DescriptionExtractor, RemovalRule};

/// Trait for extractors that locate a value inside the text.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in the text together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in the searched text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
