//! Classifier vocabulary: ordered keyword tables loaded as data.
//!
//! The default table ships inside the binary; deployments can point the
//! configuration at their own JSON file with the same shape.

use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;
use crate::models::record::Group;
use crate::phrase::rules::normalize;

/// Default vocabulary document.
pub static EMBEDDED_VOCABULARY: &str = include_str!("../../data/vocabulary.json");

lazy_static! {
    static ref EMBEDDED: Vocabulary =
        Vocabulary::from_json(EMBEDDED_VOCABULARY).expect("embedded vocabulary is valid");
}

/// Keyword tables driving category and group classification.
///
/// `categories` is scanned in declared order and the first contained
/// keyword wins, so a key must come before any shorter key it contains
/// ("plano de saude" before "saude", "imposto" before "posto").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub categories: Vec<CategoryEntry>,

    /// Emoji or words that pin the group regardless of category.
    #[serde(default)]
    pub force_groups: Vec<ForceToken>,

    /// Stems that mark a phrase as income when no keyword matched.
    #[serde(default)]
    pub income_hints: Vec<String>,

    /// Stems that mark a phrase as a fixed expense when no keyword matched.
    #[serde(default)]
    pub fixed_hints: Vec<String>,
}

/// One row of the category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Text searched for in the normalized message.
    pub keyword: String,
    /// Label written to the ledger.
    pub category: String,
    pub group: Group,
}

/// A group override token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceToken {
    pub token: String,
    pub group: Group,
}

impl Vocabulary {
    /// The vocabulary compiled into the library.
    pub fn embedded() -> &'static Vocabulary {
        &EMBEDDED
    }

    /// Parse and validate a vocabulary document.
    ///
    /// Keywords, tokens and hints are normalized on load, so tables may be
    /// written with accents.
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let mut vocabulary: Vocabulary =
            serde_json::from_str(json).map_err(|e| VocabularyError::Parse(e.to_string()))?;
        vocabulary.normalize_entries();
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Load a vocabulary document from disk.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Load from `path` when given, otherwise clone the embedded table.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::embedded().clone()),
        }
    }

    fn normalize_entries(&mut self) {
        for entry in &mut self.categories {
            entry.keyword = normalize(&entry.keyword);
        }
        for force in &mut self.force_groups {
            force.token = normalize(&force.token);
        }
        for hint in self.income_hints.iter_mut().chain(self.fixed_hints.iter_mut()) {
            *hint = normalize(hint);
        }
    }

    fn validate(&self) -> Result<(), VocabularyError> {
        if self.categories.is_empty() {
            return Err(VocabularyError::Empty);
        }

        if let Some(index) = self.categories.iter().position(|e| e.keyword.trim().is_empty()) {
            return Err(VocabularyError::EmptyEntry { kind: "keyword", index });
        }
        if let Some(index) = self.force_groups.iter().position(|f| f.token.trim().is_empty()) {
            return Err(VocabularyError::EmptyEntry { kind: "force token", index });
        }
        if let Some(index) = self.income_hints.iter().position(|h| h.trim().is_empty()) {
            return Err(VocabularyError::EmptyEntry { kind: "income hint", index });
        }
        if let Some(index) = self.fixed_hints.iter().position(|h| h.trim().is_empty()) {
            return Err(VocabularyError::EmptyEntry { kind: "fixed hint", index });
        }

        Ok(())
    }

    /// Keys that appear after a key they contain and can therefore never match.
    pub fn shadowed_keywords(&self) -> Vec<(&str, &str)> {
        let mut shadowed = Vec::new();
        for (i, later) in self.categories.iter().enumerate() {
            if let Some(earlier) = self.categories[..i]
                .iter()
                .find(|earlier| later.keyword.contains(earlier.keyword.as_str()))
            {
                shadowed.push((later.keyword.as_str(), earlier.keyword.as_str()));
            }
        }
        shadowed
    }
}
