//! Builder turning decoded CSV sources into the ordered entry sequence.
//!
//! Each source resolves its own columns first; a missing key or language
//! column is fatal before any of that source's rows is read. Row-level
//! problems never are: the row is skipped or kept, and a [`Warning`] records it.
//!
//! # Example
//!
//! ```rust
//! use weave::{builder::TableBuilder, config::ColumnNames, formats::Table, language::Language};
//!
//! let languages = vec![Language::new("en"), Language::new("fr")];
//! let columns = ColumnNames::default();
//! let table = Table::new(
//!     "Main",
//!     vec!["key".into(), "en".into(), "fr".into()],
//!     vec![vec![Some("hello".into()), Some("Hello".into()), None]],
//! );
//!
//! let built = TableBuilder::new(&languages, &columns).add_table(&table)?.build();
//! assert_eq!(built.entries.len(), 1);
//! assert_eq!(built.warnings.len(), 1); // `fr` is missing
//! # Ok::<(), weave::Error>(())
//! ```
use crate::{
    config::ColumnNames,
    diagnostics::Warning,
    error::Error,
    formats::Table,
    language::{Columns, Language, resolve_columns},
    types::{Entry, HeaderEntry, SourceLocator, TranslationEntry},
};

/// The entry sequence of one or more sources plus the warnings found on the way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuiltTable {
    pub entries: Vec<Entry>,
    pub warnings: Vec<Warning>,
}

pub struct TableBuilder<'a> {
    languages: &'a [Language],
    names: &'a ColumnNames,
    built: BuiltTable,
}

impl<'a> TableBuilder<'a> {
    pub fn new(languages: &'a [Language], names: &'a ColumnNames) -> Self {
        Self {
            languages,
            names,
            built: BuiltTable::default(),
        }
    }

    /// Appends the rows of `table` after those of previously added tables.
    pub fn add_table(self, table: &Table) -> Result<Self, Error> {
        self.add_rows(&table.origin, &table.header, &table.rows)
    }

    /// Same as [`TableBuilder::add_table`] for a header and rows held elsewhere.
    pub fn add_rows(
        mut self,
        origin: &str,
        header: &[String],
        rows: &[Vec<Option<String>>],
    ) -> Result<Self, Error> {
        let columns = resolve_columns(header, self.languages, self.names, origin)?;

        for (index, row) in rows.iter().enumerate() {
            // The header row is line 1.
            let locator = SourceLocator::new(origin, index + 2);
            self.add_row(&columns, row, locator);
        }

        Ok(self)
    }

    pub fn build(self) -> BuiltTable {
        tracing::debug!(
            entries = self.built.entries.len(),
            warnings = self.built.warnings.len(),
            "built translation table"
        );
        self.built
    }

    fn add_row(&mut self, columns: &Columns<'_>, row: &[Option<String>], locator: SourceLocator) {
        let key = match cell(row, columns.key).map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => {
                self.warn(Warning::no_key(locator));
                return;
            }
        };

        if let Some(comment) = key.strip_prefix(self.names.header_marker.as_str()) {
            self.built.entries.push(Entry::Header(HeaderEntry {
                comment: comment.trim().to_string(),
                locator,
            }));
            return;
        }

        let mut entry = TranslationEntry::new(key, locator);
        let mut all_absent = true;
        let mut any_absent = false;
        for resolved in &columns.languages {
            let value = cell(row, resolved.column).map(str::to_string);
            if value.is_some() {
                all_absent = false;
            } else {
                any_absent = true;
            }
            entry.add_translation(resolved.id(), value);
        }

        if let Some(platforms) = columns.platforms.and_then(|column| cell(row, column)) {
            entry.add_platforms(platforms);
        }

        if all_absent {
            self.warn(Warning::no_translations(entry.locator));
            return;
        }
        if any_absent {
            self.warn(Warning::partial_translations(entry.locator.clone()));
        }
        self.built.entries.push(Entry::Translation(entry));
    }

    fn warn(&mut self, warning: Warning) {
        tracing::debug!(%warning, "row warning");
        self.built.warnings.push(warning);
    }
}

/// Builds the entries of a single source.
pub fn build(
    table: &Table,
    languages: &[Language],
    names: &ColumnNames,
) -> Result<BuiltTable, Error> {
    Ok(TableBuilder::new(languages, names).add_table(table)?.build())
}

/// The cell at `column`, treating out-of-range and empty cells as absent.
pub(crate) fn cell(row: &[Option<String>], column: usize) -> Option<&str> {
    row.get(column)
        .and_then(|c| c.as_deref())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningKind;

    fn languages() -> Vec<Language> {
        vec![Language::new("en"), Language::new("fr")]
    }

    fn row(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }

    fn table(rows: Vec<Vec<Option<String>>>) -> Table {
        Table::new(
            "Main",
            vec!["key".into(), "platforms".into(), "en".into(), "fr".into()],
            rows,
        )
    }

    fn build_rows(rows: Vec<Vec<Option<String>>>) -> BuiltTable {
        build(&table(rows), &languages(), &ColumnNames::default()).unwrap()
    }

    #[test]
    fn test_header_row_strips_marker() {
        let built = build_rows(vec![row(&[
            Some("  ### Greeting  "),
            Some("android"),
            Some("ignored"),
            None,
        ])]);
        assert_eq!(built.entries.len(), 1);
        match &built.entries[0] {
            Entry::Header(header) => {
                assert_eq!(header.comment, "Greeting");
                assert_eq!(header.locator, SourceLocator::new("Main", 2));
            }
            other => panic!("expected a header, got {other:?}"),
        }
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_translation_row() {
        let built = build_rows(vec![row(&[
            Some(" hello "),
            Some("Android, iOS"),
            Some("Hello!"),
            Some("Bonjour!"),
        ])]);
        let entry = built.entries[0].as_translation().unwrap();
        assert_eq!(entry.key, "hello");
        assert_eq!(entry.translation("en"), Some("Hello!"));
        assert_eq!(entry.translation("fr"), Some("Bonjour!"));
        assert!(entry.platforms.contains("android"));
        assert!(entry.platforms.contains("ios"));
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_missing_key_is_skipped_with_warning() {
        let built = build_rows(vec![
            row(&[None, None, Some("Hello"), Some("Bonjour")]),
            row(&[Some("   "), None, Some("Hello"), Some("Bonjour")]),
        ]);
        assert!(built.entries.is_empty());
        assert_eq!(built.warnings.len(), 2);
        assert_eq!(built.warnings[0].kind, WarningKind::NoKey);
        assert_eq!(built.warnings[0].locator.line, 2);
        assert_eq!(built.warnings[1].locator.line, 3);
    }

    #[test]
    fn test_all_absent_row_is_dropped() {
        let built = build_rows(vec![row(&[Some("hello"), None, None, Some("")])]);
        assert!(built.entries.is_empty());
        assert_eq!(built.warnings.len(), 1);
        assert_eq!(built.warnings[0].kind, WarningKind::NoTranslations);
    }

    #[test]
    fn test_partial_row_is_kept_with_warning() {
        let built = build_rows(vec![row(&[Some("hello"), None, Some("Hello"), None])]);
        assert_eq!(built.entries.len(), 1);
        let entry = built.entries[0].as_translation().unwrap();
        assert_eq!(entry.translations.get("fr"), Some(&None));
        assert_eq!(built.warnings[0].kind, WarningKind::PartialTranslations);
        assert_eq!(built.warnings[0].locator.line, 2);
    }

    #[test]
    fn test_without_platforms_column_entries_are_for_all_platforms() {
        let table = Table::new(
            "Main",
            vec!["key".into(), "en".into(), "fr".into()],
            vec![row(&[Some("hello"), Some("Hello"), Some("Bonjour")])],
        );
        let built = build(&table, &languages(), &ColumnNames::default()).unwrap();
        assert!(built.entries[0].as_translation().unwrap().platforms.is_empty());
    }

    #[test]
    fn test_missing_language_column_is_fatal() {
        let table = Table::new("Main", vec!["key".into(), "en".into()], vec![]);
        let result = build(&table, &languages(), &ColumnNames::default());
        assert!(matches!(result, Err(Error::MissingLanguageColumn { .. })));
    }

    #[test]
    fn test_multiple_sources_keep_order_and_origins() {
        let languages = languages();
        let names = ColumnNames::default();
        let first = table(vec![row(&[Some("hello"), None, Some("Hello"), Some("Bonjour")])]);
        let second = Table::new(
            "Extra",
            vec!["fr".into(), "en".into(), "KEY".into()],
            vec![
                row(&[None, None, None]),
                row(&[Some("Salut"), Some("Hi"), Some("hi")]),
            ],
        );
        let built = TableBuilder::new(&languages, &names)
            .add_table(&first)
            .unwrap()
            .add_table(&second)
            .unwrap()
            .build();

        assert_eq!(built.entries.len(), 2);
        let hi = built.entries[1].as_translation().unwrap();
        assert_eq!(hi.key, "hi");
        assert_eq!(hi.translation("fr"), Some("Salut"));
        assert_eq!(hi.locator, SourceLocator::new("Extra", 3));
        assert_eq!(built.warnings.len(), 1);
        assert_eq!(built.warnings[0].locator, SourceLocator::new("Extra", 2));
    }

    #[test]
    fn test_custom_header_marker() {
        let languages = languages();
        let names = ColumnNames {
            header_marker: "//".to_string(),
            ..ColumnNames::default()
        };
        let built = TableBuilder::new(&languages, &names)
            .add_table(&table(vec![row(&[Some("// Section"), None, None, None])]))
            .unwrap()
            .build();
        assert!(matches!(&built.entries[0], Entry::Header(h) if h.comment == "Section"));
    }
}
