//! Free-text description derived from whatever the other extractors leave.

use regex::Regex;

use crate::models::vocabulary::Vocabulary;

use super::{normalize, AmountExtractor, FieldExtractor};
use super::patterns::{
    CARD, CURRENCY_MARKER, DATE_DMY, INSTALLMENT_PHRASE, PAYMENT_WORDS, PUNCTUATION, STOP_WORDS,
    TEMPORAL_WORDS, VERBS, WHITESPACE,
};

/// Default description length limit, in characters.
pub const DEFAULT_MAX_CHARS: usize = 60;

/// One step of the description cleanup. Removed text becomes a space.
#[derive(Debug, Clone)]
pub enum RemovalRule {
    /// Byte range in the text handed to this rule. Only meaningful as the
    /// first rule, before any other rule has shifted offsets.
    Span(usize, usize),
    /// Every occurrence of a literal.
    Literal(String),
    /// Every match of a pattern.
    Pattern(&'static Regex),
}

impl RemovalRule {
    pub fn apply(&self, text: &str) -> String {
        match self {
            RemovalRule::Span(start, end) => match (text.get(..*start), text.get(*end..)) {
                (Some(before), Some(after)) if start <= end => format!("{} {}", before, after),
                _ => text.to_string(),
            },
            RemovalRule::Literal(literal) if literal.is_empty() => text.to_string(),
            RemovalRule::Literal(literal) => text.replace(literal.as_str(), " "),
            RemovalRule::Pattern(pattern) => pattern.replace_all(text, " ").into_owned(),
        }
    }
}

/// Description extractor.
///
/// Recomputes the amount span itself so it depends only on the text and
/// the category keyword chosen by the classifier.
pub struct DescriptionExtractor<'a> {
    vocabulary: &'a Vocabulary,
    max_chars: usize,
}

impl<'a> DescriptionExtractor<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Removal rules for `text`, in application order.
    ///
    /// Multi-word phrases (keyword, force tokens, card and installment
    /// phrases) go before the single words they may contain.
    pub fn rules(&self, text: &str, keyword: Option<&str>) -> Vec<RemovalRule> {
        let mut rules = Vec::new();

        if let Some((start, end)) = AmountExtractor::new()
            .extract(text)
            .and_then(|m| m.position)
        {
            rules.push(RemovalRule::Span(start, end));
        }

        rules.push(RemovalRule::Pattern(&CURRENCY_MARKER));
        rules.push(RemovalRule::Pattern(&DATE_DMY));

        if let Some(keyword) = keyword.map(str::trim) {
            rules.push(RemovalRule::Literal(keyword.to_string()));
        }
        rules.extend(
            self.vocabulary
                .force_groups
                .iter()
                .map(|force| RemovalRule::Literal(force.token.clone())),
        );

        rules.extend([
            RemovalRule::Pattern(&CARD),
            RemovalRule::Pattern(&INSTALLMENT_PHRASE),
            RemovalRule::Pattern(&TEMPORAL_WORDS),
            RemovalRule::Pattern(&VERBS),
            RemovalRule::Pattern(&PAYMENT_WORDS),
            RemovalRule::Pattern(&STOP_WORDS),
            RemovalRule::Pattern(&PUNCTUATION),
        ]);

        rules
    }

    /// Derive the description. May be empty; never longer than the limit.
    pub fn extract(&self, text: &str, keyword: Option<&str>) -> String {
        let normalized = normalize(text);

        let stripped = self
            .rules(&normalized, keyword)
            .iter()
            .fold(normalized, |working, rule| rule.apply(&working));

        let collapsed = WHITESPACE.replace_all(&stripped, " ");
        let description = collapsed.trim();

        if description.is_empty() || Some(description) == keyword.map(str::trim) {
            return String::new();
        }

        let truncated: String = description.chars().take(self.max_chars).collect();
        truncated.trim_end().to_string()
    }
}
