//! Installment condition detection.

use regex::Regex;

use crate::models::record::InstallmentCondition;

use super::patterns::{
    INSTALLMENT_COUNT_WORD, INSTALLMENT_PARCEL_TIMES, INSTALLMENT_PARCEL_X, INSTALLMENT_STEM,
    INSTALLMENT_TIMES, INSTALLMENT_X,
};

/// Installment extractor.
///
/// A count of one (or zero) means paid in full.
pub struct InstallmentExtractor;

impl InstallmentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Detect the installment condition in normalized text.
    pub fn detect(&self, text: &str) -> InstallmentCondition {
        let counted: [&Regex; 5] = [
            &*INSTALLMENT_X,
            &*INSTALLMENT_TIMES,
            &*INSTALLMENT_COUNT_WORD,
            &*INSTALLMENT_PARCEL_X,
            &*INSTALLMENT_PARCEL_TIMES,
        ];

        for pattern in counted {
            if let Some(count) = pattern
                .captures(text)
                .and_then(|caps| caps[1].parse::<u32>().ok())
            {
                return if count > 1 {
                    InstallmentCondition::Installments(count)
                } else {
                    InstallmentCondition::Cash
                };
            }
        }

        if INSTALLMENT_STEM.is_match(text) {
            return InstallmentCondition::InstallmentsUnknown;
        }

        InstallmentCondition::Cash
    }
}

impl Default for InstallmentExtractor {
    fn default() -> Self {
        Self::new()
    }
}
