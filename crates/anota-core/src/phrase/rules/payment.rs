//! Payment method classification.

use crate::models::record::PaymentMethod;

use super::patterns::{BANK_SLIP, CARD, CASH, CREDIT, DEBIT, PIX};

/// Payment method extractor.
///
/// Always yields a method: with no signal at all the purchase is assumed
/// to be on a card.
pub struct PaymentMethodExtractor;

impl PaymentMethodExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Classify the payment instrument named in normalized text.
    pub fn classify(&self, text: &str) -> PaymentMethod {
        if PIX.is_match(text) {
            return PaymentMethod::Pix;
        }
        if CASH.is_match(text) {
            return PaymentMethod::Cash;
        }
        if BANK_SLIP.is_match(text) {
            return PaymentMethod::BankSlip;
        }
        if let Some(caps) = CARD.captures(text) {
            let issuer = caps.name("issuer").map(|m| capitalize(m.as_str()));
            return PaymentMethod::Card(issuer);
        }
        if CREDIT.is_match(text) {
            return PaymentMethod::CreditCard;
        }
        if DEBIT.is_match(text) {
            return PaymentMethod::DebitCard;
        }

        PaymentMethod::default()
    }
}

impl Default for PaymentMethodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
