//! Amount extraction for BRL-formatted values.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::{AMOUNT_PATTERN, COUNT_SUFFIX, THOUSANDS_GROUPED};

/// Amount field extractor.
///
/// Only strictly positive values count; a number directly followed by
/// "vezes" or "parcelas" is an installment count and is skipped.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in AMOUNT_PATTERN.captures_iter(text) {
            let (Some(value), Some(number), Some(whole)) =
                (caps.name("value"), caps.name("number"), caps.get(0))
            else {
                continue;
            };

            if COUNT_SUFFIX.is_match(&text[whole.end()..]) {
                continue;
            }

            if let Some(amount) = parse_brl_amount(number.as_str()) {
                if amount > Decimal::ZERO {
                    results.push(
                        ExtractionMatch::new(amount, value.as_str())
                            .with_position(value.start(), value.end()),
                    );
                }
            }
        }

        results
    }
}

/// Parse a BRL-formatted amount (e.g., "1.234,56", "1234,56" or "1234.56").
///
/// A lone dot is a thousands separator only when it groups exactly three
/// digits ("1.234"); otherwise it is the decimal point ("12.5").
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        (None, Some(_)) if THOUSANDS_GROUPED.is_match(&cleaned) => cleaned.replace('.', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// Format amount in BRL style (1.234,56).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return format!("{}{}", sign, s);
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{}{},{}", sign, formatted, decimal_part)
}
