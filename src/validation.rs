//! Key integrity checks over a whole built table.
//!
//! Keys may only contain ASCII letters, digits and underscores, and must be
//! unique (exact, case-sensitive match) across every source of the run.
//! Headers are not keys and are ignored. The first problem found, in entry
//! order, is returned.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    types::{Entry, SourceLocator, TranslationEntry},
};

lazy_static! {
    static ref ILLEGAL_KEY_CHARACTER: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

/// Returns the first illegal or duplicated key in `entries`.
///
/// For an entry at position `i`, its own key format is checked before looking
/// for a later entry with the same key, so the reported error is the one a
/// pairwise scan in entry order would hit first.
pub fn validate(entries: &[Entry]) -> Result<(), Error> {
    let translations: Vec<&TranslationEntry> =
        entries.iter().filter_map(Entry::as_translation).collect();

    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, entry) in translations.iter().enumerate() {
        positions.entry(entry.key.as_str()).or_default().push(index);
    }

    for (index, entry) in translations.iter().enumerate() {
        validate_key(entry)?;

        let later = positions
            .get(entry.key.as_str())
            .and_then(|found| found.iter().find(|&&other| other > index));
        if let Some(&other) = later {
            return Err(Error::DuplicateKey {
                key: entry.key.clone(),
                first: entry.locator.clone(),
                second: translations[other].locator.clone(),
            });
        }
    }

    tracing::debug!(keys = translations.len(), "validated keys");
    Ok(())
}

/// Checks the format of a single key.
pub fn validate_key(entry: &TranslationEntry) -> Result<(), Error> {
    check_key(&entry.key, &entry.locator)
}

pub(crate) fn check_key(key: &str, locator: &SourceLocator) -> Result<(), Error> {
    if key.trim().is_empty() {
        return Err(Error::EmptyKey {
            locator: locator.clone(),
        });
    }
    if ILLEGAL_KEY_CHARACTER.is_match(key) {
        return Err(Error::IllegalKeyCharacter {
            key: key.to_string(),
            locator: locator.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HeaderEntry, SourceLocator};

    fn translation(key: &str, line: usize) -> Entry {
        let mut entry = TranslationEntry::new(key, SourceLocator::new("Main", line));
        entry.add_translation("en", Some("value".to_string()));
        Entry::Translation(entry)
    }

    fn header(comment: &str, line: usize) -> Entry {
        Entry::Header(HeaderEntry {
            comment: comment.to_string(),
            locator: SourceLocator::new("Main", line),
        })
    }

    #[test]
    fn test_valid_keys_pass() {
        let entries = vec![
            header("Section", 2),
            translation("my_key1", 3),
            translation("OTHER_key", 4),
        ];
        assert!(validate(&entries).is_ok());
    }

    #[test]
    fn test_space_in_key_fails() {
        let entries = vec![translation("my key", 2)];
        assert!(matches!(
            validate(&entries),
            Err(Error::IllegalKeyCharacter { ref key, .. }) if key == "my key"
        ));
    }

    #[test]
    fn test_dash_in_key_fails() {
        let entries = vec![translation("my-key", 2)];
        assert!(matches!(
            validate(&entries),
            Err(Error::IllegalKeyCharacter { .. })
        ));
    }

    #[test]
    fn test_non_ascii_letter_fails() {
        let entries = vec![translation("café", 2)];
        assert!(matches!(
            validate(&entries),
            Err(Error::IllegalKeyCharacter { .. })
        ));
    }

    #[test]
    fn test_empty_key_fails() {
        let entries = vec![translation("", 2)];
        assert!(matches!(validate(&entries), Err(Error::EmptyKey { .. })));
    }

    #[test]
    fn test_duplicate_key_reports_both_locations() {
        let entries = vec![
            translation("hello", 2),
            header("Section", 3),
            translation("bye", 4),
            translation("hello", 5),
        ];
        match validate(&entries) {
            Err(Error::DuplicateKey { key, first, second }) => {
                assert_eq!(key, "hello");
                assert_eq!(first.line, 2);
                assert_eq!(second.line, 5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let entries = vec![translation("my_key", 2), translation("MY_KEY", 3)];
        assert!(validate(&entries).is_ok());
    }

    #[test]
    fn test_headers_are_not_keys() {
        let entries = vec![header("same", 2), header("same", 3), header("has space", 4)];
        assert!(validate(&entries).is_ok());
    }

    #[test]
    fn test_first_problem_in_order_wins() {
        // "a" at line 2 has a later duplicate, which is found before the illegal key at line 3.
        let entries = vec![
            translation("a", 2),
            translation("b-c", 3),
            translation("a", 4),
        ];
        assert!(matches!(
            validate(&entries),
            Err(Error::DuplicateKey { ref first, .. }) if first.line == 2
        ));

        // An illegal key is found before a duplicate pair that starts after it.
        let entries = vec![
            translation("b-c", 2),
            translation("a", 3),
            translation("a", 4),
        ];
        assert!(matches!(
            validate(&entries),
            Err(Error::IllegalKeyCharacter { ref locator, .. }) if locator.line == 2
        ));
    }

    #[test]
    fn test_triplicate_reports_first_pair() {
        let entries = vec![
            translation("a", 2),
            translation("a", 3),
            translation("a", 4),
        ];
        match validate(&entries) {
            Err(Error::DuplicateKey { first, second, .. }) => {
                assert_eq!(first.line, 2);
                assert_eq!(second.line, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
