//! Declared languages and header-row column resolution.

use serde::{Deserialize, Serialize};

use crate::{config::ColumnNames, error::Error};

/// A language the documents are produced for, as declared in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Language {
    pub id: String,

    /// Where the caller intends to write this language's document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Language {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn matches_header(&self, cell: &str) -> bool {
        same_name(cell.trim(), self.id.trim())
    }
}

/// A declared language bound to its column in one CSV source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLanguage<'a> {
    pub language: &'a Language,
    pub column: usize,
}

impl ResolvedLanguage<'_> {
    pub fn id(&self) -> &str {
        &self.language.id
    }
}

/// Column layout of one CSV source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns<'a> {
    pub key: usize,
    /// `None` disables platform restrictions for this source.
    pub platforms: Option<usize>,
    /// Same order as the declared languages.
    pub languages: Vec<ResolvedLanguage<'a>>,
}

/// Scans `header` for the key column, the optional platforms column and one
/// column per declared language. Matching ignores case; language cells are
/// also trimmed. A later matching cell wins over an earlier one.
pub fn resolve_columns<'a>(
    header: &[String],
    languages: &'a [Language],
    names: &ColumnNames,
    origin: &str,
) -> Result<Columns<'a>, Error> {
    let mut key = None;
    let mut platforms = None;
    let mut language_columns: Vec<Option<usize>> = vec![None; languages.len()];

    for (index, cell) in header.iter().enumerate() {
        if same_name(cell, &names.key) {
            key = Some(index);
            continue;
        }
        if same_name(cell, &names.platforms) {
            platforms = Some(index);
            continue;
        }
        if let Some(position) = languages.iter().position(|l| l.matches_header(cell)) {
            language_columns[position] = Some(index);
        }
    }

    let key = key.ok_or_else(|| Error::MissingKeyColumn {
        column: names.key.clone(),
        origin: origin.to_string(),
    })?;

    let languages = languages
        .iter()
        .zip(language_columns)
        .map(|(language, column)| match column {
            Some(column) => Ok(ResolvedLanguage { language, column }),
            None => Err(Error::MissingLanguageColumn {
                language: language.id.clone(),
                origin: origin.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(origin, key, ?platforms, languages = languages.len(), "resolved columns");

    Ok(Columns {
        key,
        platforms,
        languages,
    })
}

/// Index of the last header cell named `name`, ignoring case.
pub fn find_column(header: &[String], name: &str) -> Option<usize> {
    header.iter().rposition(|cell| same_name(cell, name))
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
