//! Per-culture resource sets.
//!
//! A [`LocalizationLanguage`] holds the identity metadata of one culture
//! (display name, description, culture id) plus the merged mapping from
//! key path to translated value. Identity field names never appear as
//! entry keys; the parsers strip them before a set is constructed.

use std::collections::HashMap;

use serde::Serialize;

/// All localized entries for a single culture.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizationLanguage {
    /// Display name of the language (e.g. "简体中文").
    pub language: String,
    /// Free-form description shown in language pickers.
    pub description: String,
    /// Canonical culture identifier (e.g. "zh-CN"); registry grouping key.
    pub culture_id: String,
    /// Key path -> translated value.
    pub entries: HashMap<String, String>,
}

impl LocalizationLanguage {
    pub fn new(
        language: impl Into<String>,
        description: impl Into<String>,
        culture_id: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            description: description.into(),
            culture_id: culture_id.into(),
            entries: HashMap::new(),
        }
    }

    /// Look up a translated value by key path.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Merge another set for the same culture into this one.
    ///
    /// Entry values from `other` overwrite existing keys (later source
    /// wins); identity fields are first-writer-wins and stay untouched.
    pub fn merge_from(&mut self, other: LocalizationLanguage) {
        self.entries.extend(other.entries);
    }

    /// Identity-only view for language pickers.
    pub fn info(&self) -> LanguageInfo {
        LanguageInfo {
            culture_id: self.culture_id.clone(),
            language: self.language.clone(),
            description: self.description.clone(),
        }
    }
}

/// Identity metadata of one culture, without the entry table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub culture_id: String,
    pub language: String,
    pub description: String,
}
