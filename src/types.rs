//! Core types of the translation table.
//! The table builder produces these; the validator and the renderers consume them.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use serde::{Deserialize, Serialize};

/// Where an entry came from: the source label and the 1-based line number,
/// the header row being line 1. Only used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SourceLocator {
    pub origin: String,
    pub line: usize,
}

impl SourceLocator {
    pub fn new(origin: impl Into<String>, line: usize) -> Self {
        Self {
            origin: origin.into(),
            line,
        }
    }
}

impl Display for SourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {} from {}", self.line, self.origin)
    }
}

/// One logical row of the translation table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    /// A section header, rendered as a comment where the platform supports it.
    Header(HeaderEntry),
    /// A translatable key with its per-language values.
    Translation(TranslationEntry),
}

impl Entry {
    pub fn locator(&self) -> &SourceLocator {
        match self {
            Entry::Header(header) => &header.locator,
            Entry::Translation(translation) => &translation.locator,
        }
    }

    pub fn as_translation(&self) -> Option<&TranslationEntry> {
        match self {
            Entry::Translation(translation) => Some(translation),
            Entry::Header(_) => None,
        }
    }
}

/// A comment-only row. `comment` is human-readable text, not a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeaderEntry {
    pub comment: String,
    pub locator: SourceLocator,
}

/// A translatable row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationEntry {
    pub key: String,

    /// Value per declared language id. `None` means the cell was absent.
    pub translations: BTreeMap<String, Option<String>>,

    /// Lowercased platform identifiers this entry is restricted to.
    /// Empty means the entry is for every platform.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub platforms: BTreeSet<String>,

    pub locator: SourceLocator,
}

impl TranslationEntry {
    pub fn new(key: impl Into<String>, locator: SourceLocator) -> Self {
        Self {
            key: key.into(),
            translations: BTreeMap::new(),
            platforms: BTreeSet::new(),
            locator,
        }
    }

    /// Records the value of `language`, which may be absent.
    pub fn add_translation(&mut self, language: impl Into<String>, value: Option<String>) {
        self.translations.insert(language.into(), value);
    }

    /// Returns the value for `language`, `None` if absent or unknown.
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).and_then(|v| v.as_deref())
    }

    /// Adds the comma-separated platforms of a CSV cell. Tokens are trimmed and
    /// lowercased; blank tokens are ignored.
    pub fn add_platforms(&mut self, platform_csv: &str) {
        self.platforms.extend(platform_tokens(platform_csv));
    }

    /// Whether this entry should be rendered for the platform `id` (lowercased).
    pub fn is_for_platform(&self, id: &str) -> bool {
        is_for_platform(&self.platforms, id)
    }
}

pub(crate) fn platform_tokens(platform_csv: &str) -> impl Iterator<Item = String> + '_ {
    platform_csv
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
}

pub(crate) fn is_for_platform(platforms: &BTreeSet<String>, id: &str) -> bool {
    platforms.is_empty() || platforms.contains(&id.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> TranslationEntry {
        TranslationEntry::new("hello", SourceLocator::new("Main", 2))
    }

    #[test]
    fn test_locator_display() {
        assert_eq!(SourceLocator::new("Main", 7).to_string(), "Line 7 from Main");
    }

    #[test]
    fn test_add_platforms_trims_and_lowercases() {
        let mut entry = entry();
        entry.add_platforms(" Android, iOS ,");
        assert_eq!(
            entry.platforms.iter().cloned().collect::<Vec<_>>(),
            vec!["android".to_string(), "ios".to_string()]
        );
    }

    #[test]
    fn test_blank_platform_cell_means_all_platforms() {
        let mut entry = entry();
        entry.add_platforms("   ");
        assert!(entry.platforms.is_empty());
        assert!(entry.is_for_platform("android"));
        assert!(entry.is_for_platform("web"));
    }

    #[test]
    fn test_is_for_platform_membership() {
        let mut entry = entry();
        entry.add_platforms("android");
        assert!(entry.is_for_platform("android"));
        assert!(entry.is_for_platform("Android"));
        assert!(!entry.is_for_platform("ios"));
    }

    #[test]
    fn test_translation_lookup() {
        let mut entry = entry();
        entry.add_translation("en", Some("Hello".to_string()));
        entry.add_translation("fr", None);
        assert_eq!(entry.translation("en"), Some("Hello"));
        assert_eq!(entry.translation("fr"), None);
        assert_eq!(entry.translation("de"), None);
    }

    #[test]
    fn test_entry_serializes_with_tag() {
        let header = Entry::Header(HeaderEntry {
            comment: "Greeting".to_string(),
            locator: SourceLocator::new("Main", 2),
        });
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["type"], "header");
        assert_eq!(json["comment"], "Greeting");
        assert_eq!(header.locator().line, 2);
        assert!(header.as_translation().is_none());
    }
}
