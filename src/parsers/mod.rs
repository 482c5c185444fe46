//! Format parsers for localization source documents.
//!
//! Each parser validates a document's culture identity and produces a
//! [`LocalizationLanguage`] with a flat key-path entry table. A document
//! that is not a language file (missing identity, malformed content) is
//! skipped with a [`ParseSkip`], never a hard failure: directory scans mix
//! language files with unrelated files and one bad document must not abort
//! a batch.

mod json;
mod restable;
mod xml;

pub use json::JsonParser;
pub use restable::ResTableParser;
pub use xml::XmlParser;

use std::path::Path;

use enum_dispatch::enum_dispatch;
use thiserror::Error;

use crate::language::LocalizationLanguage;

/// Root-level field carrying the language display name.
pub const LANGUAGE_KEY: &str = "language";
/// Root-level field carrying the language description.
pub const DESCRIPTION_KEY: &str = "description";
/// Root-level field carrying the canonical culture identifier.
pub const CULTURE_NAME_KEY: &str = "cultureName";

/// The three identity fields, excluded from entry tables.
pub const IDENTITY_KEYS: [&str; 3] = [LANGUAGE_KEY, DESCRIPTION_KEY, CULTURE_NAME_KEY];

/// Culture assumed for flat-table files whose name carries no culture tag.
pub const FALLBACK_TABLE_CULTURE: &str = "en-US";

/// Why a candidate source was excluded from ingestion.
///
/// Diagnostic-only: callers log it at debug level and move on.
#[derive(Debug, Error)]
pub enum ParseSkip {
    #[error("missing or blank identity fields")]
    MissingIdentity,
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Supported source document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Json,
    Xml,
    ResTable,
}

impl FormatKind {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(FormatKind::Json),
            "xml" => Some(FormatKind::Xml),
            "resx" => Some(FormatKind::ResTable),
            _ => None,
        }
    }
}

/// One source document handed to the registry.
#[derive(Debug, Clone)]
pub struct Source {
    pub kind: FormatKind,
    /// Original file name, when the source came from disk. Used by the
    /// flat-table parser to derive the culture and by diagnostics.
    pub name: Option<String>,
    pub content: String,
}

impl Source {
    pub fn new(kind: FormatKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            name: None,
            content: content.into(),
        }
    }

    pub fn named(kind: FormatKind, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            content: content.into(),
        }
    }

    pub fn describe(&self) -> &str {
        self.name.as_deref().unwrap_or("<inline>")
    }
}

/// A format parser: source document in, per-culture resource set out.
#[enum_dispatch]
pub trait ResourceParser {
    fn parse(&self, source: &Source) -> Result<LocalizationLanguage, ParseSkip>;
}

/// Closed set of format parsers, dispatched by [`FormatKind`].
#[enum_dispatch(ResourceParser)]
#[derive(Debug)]
pub enum FormatParser {
    Json(JsonParser),
    Xml(XmlParser),
    ResTable(ResTableParser),
}

impl FormatParser {
    pub fn for_kind(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Json => FormatParser::Json(JsonParser),
            FormatKind::Xml => FormatParser::Xml(XmlParser),
            FormatKind::ResTable => FormatParser::ResTable(ResTableParser),
        }
    }
}

/// Identity fields must be present and non-whitespace to count.
pub(crate) fn identity_value(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(text) if !text.trim().is_empty() => Some(text.to_string()),
        _ => None,
    }
}
