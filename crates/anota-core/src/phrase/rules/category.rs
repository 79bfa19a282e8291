//! Category and group classification from the keyword vocabulary.

use crate::models::record::Group;
use crate::models::vocabulary::{ForceToken, Vocabulary};

/// Category label used when no keyword matched.
pub const FALLBACK_CATEGORY: &str = "Outros";

/// Category label used when only the income heuristic fired.
pub const INCOME_CATEGORY: &str = "Receita";

/// Outcome of classifying one phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: String,
    pub group: Group,
    /// Keyword that produced the category, if any.
    pub keyword: Option<String>,
}

/// Keyword-table classifier.
///
/// Matching is substring containment on normalized text, not word-based:
/// "posto" also matches inside "composto". Table order resolves overlaps.
/// A keyword starting with a space only matches at the start of a word
/// (" acoes" skips "prestacoes"); the text is padded so this also holds at
/// the start of the message.
pub struct CategoryClassifier<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> CategoryClassifier<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// First override token present in the text.
    pub fn force_group(&self, text: &str) -> Option<&'a ForceToken> {
        self.vocabulary
            .force_groups
            .iter()
            .find(|force| text.contains(force.token.as_str()))
    }

    /// Classify by keyword table, then by income and fixed-expense hints,
    /// then default to a variable expense.
    pub fn classify(&self, text: &str) -> Classification {
        let padded = format!(" {} ", text);
        if let Some(entry) = self
            .vocabulary
            .categories
            .iter()
            .find(|entry| padded.contains(entry.keyword.as_str()))
        {
            return Classification {
                category: entry.category.clone(),
                group: entry.group,
                keyword: Some(entry.keyword.clone()),
            };
        }

        let (category, group) = if contains_any(text, &self.vocabulary.income_hints) {
            (INCOME_CATEGORY, Group::Income)
        } else if contains_any(text, &self.vocabulary.fixed_hints) {
            (FALLBACK_CATEGORY, Group::FixedExpenses)
        } else {
            (FALLBACK_CATEGORY, Group::VariableExpenses)
        };

        Classification {
            category: category.to_string(),
            group,
            keyword: None,
        }
    }
}

fn contains_any(text: &str, stems: &[String]) -> bool {
    stems.iter().any(|stem| text.contains(stem.as_str()))
}
