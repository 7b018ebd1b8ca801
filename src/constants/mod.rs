//! Constants files generated from a spreadsheet, such as analytics event and
//! screen names.
//!
//! A constants source shares the key and platforms columns of a translation
//! source, and adds a value column and an optional type column. Each row
//! becomes one identifier: a Kotlin `const val`, a Swift `static let` or a JSON
//! pair. Rows with a type are nested in one `object`, `enum` or JSON object
//! per type.
//!
//! ```rust
//! use weave::{config::ColumnNames, formats::{Platform, Table}, traits::Parser};
//! use weave::constants::{ConstantsBuilder, ConstantsConfig, render_constants};
//!
//! let config = ConstantsConfig::new("Analytics").with_type_column("type");
//! let columns = ColumnNames::default();
//! let table = Table::from_str("key,type,value\nhome,Screen,Home\n")?;
//!
//! let built = ConstantsBuilder::new(&config, &columns).add_table(&table)?.build();
//! let document = render_constants(&built.entries, &config, Platform::Web)?;
//! assert_eq!(document.text, "{\n    \"screen\": {\n        \"home\": \"Home\"\n    }\n}\n");
//! # Ok::<(), weave::Error>(())
//! ```

mod casing;
mod writer;

use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};

use serde::{Deserialize, Serialize};

pub use self::casing::Casing;

use crate::{
    builder::cell,
    config::{ColumnNames, default_true},
    diagnostics::Warning,
    error::Error,
    formats::{Platform, Table},
    language::{find_column, resolve_columns},
    types::{SourceLocator, is_for_platform, platform_tokens},
    validation::check_key,
};

/// First line of every generated constants file.
pub const GENERATED_HEADER: &str = "List of Constants, auto-generated by Weave";

fn default_value_column() -> String {
    "value".to_string()
}

fn default_type_casing() -> Casing {
    Casing::Pascal
}

fn default_key_casing() -> Casing {
    Casing::Camel
}

/// One set of constants and the file it is written to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantsConfig {
    /// Name of this set, used in logs and as the fallback class name.
    pub title: String,

    /// Where the caller intends to write the file. Its stem names the
    /// top-level class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Kotlin package, required on Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    /// Header of the column holding the type. No column means no nesting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_column: Option<String>,

    #[serde(default = "default_value_column")]
    pub value_column: String,

    /// Column at which the `=` of mobile declarations is aligned. 0 disables
    /// alignment.
    #[serde(default)]
    pub values_align_column: usize,

    #[serde(default = "default_type_casing")]
    pub type_casing: Casing,

    #[serde(default = "default_key_casing")]
    pub key_casing: Casing,

    /// Wrap everything in a class named after the file on Android and iOS.
    #[serde(default = "default_true")]
    pub top_level_class: bool,
}

impl ConstantsConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: None,
            package_name: None,
            type_column: None,
            value_column: default_value_column(),
            values_align_column: 0,
            type_casing: default_type_casing(),
            key_casing: default_key_casing(),
            top_level_class: true,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn with_type_column(mut self, column: impl Into<String>) -> Self {
        self.type_column = Some(column.into());
        self
    }

    pub fn with_value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = column.into();
        self
    }

    pub fn with_values_align_column(mut self, column: usize) -> Self {
        self.values_align_column = column;
        self
    }

    pub fn with_type_casing(mut self, casing: Casing) -> Self {
        self.type_casing = casing;
        self
    }

    pub fn with_key_casing(mut self, casing: Casing) -> Self {
        self.key_casing = casing;
        self
    }

    pub fn with_top_level_class(mut self, top_level_class: bool) -> Self {
        self.top_level_class = top_level_class;
        self
    }

    /// The type column name, `None` when unset or blank.
    pub fn type_column(&self) -> Option<&str> {
        self.type_column
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Name of the top-level class: the file stem of `path`, or the title in
    /// Pascal case.
    pub fn object_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|path| Path::new(path).file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| Casing::Pascal.apply(&self.title))
    }

    pub fn validate(&self, platform: Platform, names: &ColumnNames) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "constants title must not be blank".to_string(),
            ));
        }
        if platform == Platform::Android
            && self
                .package_name
                .as_deref()
                .is_none_or(|name| name.trim().is_empty())
        {
            return Err(Error::InvalidConfig(format!(
                "please provide a package name for Android in `{}`",
                self.title
            )));
        }
        if self.values_align_column % 4 != 0 {
            return Err(Error::InvalidConfig(format!(
                "valuesAlignColumn must be a multiple of 4, got {}",
                self.values_align_column
            )));
        }
        if self.value_column.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "`valueColumn` must not be blank".to_string(),
            ));
        }
        let reserved = [names.key.as_str(), names.platforms.as_str()];
        for column in std::iter::once(self.value_column.as_str()).chain(self.type_column()) {
            if reserved.iter().any(|name| name.eq_ignore_ascii_case(column.trim())) {
                return Err(Error::InvalidConfig(format!(
                    "`{column}` is already the key or platforms column"
                )));
            }
        }
        Ok(())
    }
}

/// One row of a constants source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConstantEntry {
    pub key: String,

    /// Empty when the row has no type.
    #[serde(rename = "type", default)]
    pub kind: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub platforms: BTreeSet<String>,

    pub locator: SourceLocator,
}

impl ConstantEntry {
    pub fn is_for_platform(&self, id: &str) -> bool {
        is_for_platform(&self.platforms, id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuiltConstants {
    pub entries: Vec<ConstantEntry>,
    pub warnings: Vec<Warning>,
}

struct Layout {
    key: usize,
    platforms: Option<usize>,
    value: usize,
    kind: Option<usize>,
}

/// Reads constants sources in order, the same way [`crate::builder::TableBuilder`]
/// reads translation sources.
pub struct ConstantsBuilder<'a> {
    config: &'a ConstantsConfig,
    names: &'a ColumnNames,
    built: BuiltConstants,
}

impl<'a> ConstantsBuilder<'a> {
    pub fn new(config: &'a ConstantsConfig, names: &'a ColumnNames) -> Self {
        Self {
            config,
            names,
            built: BuiltConstants::default(),
        }
    }

    pub fn add_table(self, table: &Table) -> Result<Self, Error> {
        self.add_rows(&table.origin, &table.header, &table.rows)
    }

    pub fn add_rows(
        mut self,
        origin: &str,
        header: &[String],
        rows: &[Vec<Option<String>>],
    ) -> Result<Self, Error> {
        let columns = resolve_columns(header, &[], self.names, origin)?;
        let value = find_column(header, &self.config.value_column).ok_or_else(|| {
            Error::MissingValueColumn {
                column: self.config.value_column.clone(),
                origin: origin.to_string(),
            }
        })?;
        let layout = Layout {
            key: columns.key,
            platforms: columns.platforms,
            value,
            kind: self
                .config
                .type_column()
                .and_then(|name| find_column(header, name)),
        };

        for (index, row) in rows.iter().enumerate() {
            self.add_row(&layout, row, SourceLocator::new(origin, index + 2));
        }
        Ok(self)
    }

    pub fn build(self) -> BuiltConstants {
        tracing::debug!(
            title = %self.config.title,
            entries = self.built.entries.len(),
            warnings = self.built.warnings.len(),
            "built constants"
        );
        self.built
    }

    fn add_row(&mut self, layout: &Layout, row: &[Option<String>], locator: SourceLocator) {
        let key = match cell(row, layout.key).map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => {
                self.warn(Warning::no_key(locator));
                return;
            }
        };
        // Section headers have no place in a constants file.
        if key.starts_with(self.names.header_marker.as_str()) {
            return;
        }
        let value = match cell(row, layout.value).map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => {
                self.warn(Warning::no_value(locator));
                return;
            }
        };

        self.built.entries.push(ConstantEntry {
            key: key.to_string(),
            kind: layout
                .kind
                .and_then(|column| cell(row, column))
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            value: value.to_string(),
            platforms: layout
                .platforms
                .and_then(|column| cell(row, column))
                .map(|platforms| platform_tokens(platforms).collect())
                .unwrap_or_default(),
            locator,
        });
    }

    fn warn(&mut self, warning: Warning) {
        tracing::debug!(%warning, "row warning");
        self.built.warnings.push(warning);
    }
}

/// Keeps the entries for `platform`, or all of them when `platform` is `None`.
pub fn filter_platform(
    entries: Vec<ConstantEntry>,
    platform: Option<Platform>,
) -> Vec<ConstantEntry> {
    match platform {
        Some(platform) => entries
            .into_iter()
            .filter(|entry| entry.is_for_platform(platform.id()))
            .collect(),
        None => entries,
    }
}

/// Returns the first key that is empty or has a character outside
/// `[A-Za-z0-9_]`.
pub fn validate(entries: &[ConstantEntry]) -> Result<(), Error> {
    entries
        .iter()
        .try_for_each(|entry| check_key(&entry.key, &entry.locator))
}

/// Drops each constant that a later one with the same key and type replaces.
///
/// Keys match exactly, types ignoring case. One warning is returned per
/// dropped entry, naming the entry that replaced it.
pub fn dedupe(entries: Vec<ConstantEntry>) -> (Vec<ConstantEntry>, Vec<Warning>) {
    let mut latest: HashMap<(String, String), usize> = HashMap::new();
    let mut dropped = vec![false; entries.len()];
    let mut warnings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let id = (entry.key.clone(), entry.kind.to_lowercase());
        if let Some(previous) = latest.insert(id, index) {
            dropped[previous] = true;
            warnings.push(Warning::duplicate_constant(
                entries[previous].locator.clone(),
                &entry.key,
                entry.locator.clone(),
            ));
        }
    }

    let kept = entries
        .into_iter()
        .zip(dropped)
        .filter_map(|(entry, dropped)| (!dropped).then_some(entry))
        .collect();
    (kept, warnings)
}

/// A rendered constants file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConstantsDocument {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub platform: Platform,
    pub text: String,
}

/// Entries of one type, in order of first appearance.
pub(crate) struct Group<'e> {
    pub kind: &'e str,
    pub entries: Vec<&'e ConstantEntry>,
}

/// Splits `entries` into those without a type and one group per type. Types
/// are matched ignoring case and named after their first spelling.
pub(crate) fn group(entries: &[ConstantEntry]) -> (Vec<&ConstantEntry>, Vec<Group<'_>>) {
    let mut untyped = Vec::new();
    let mut groups: Vec<Group<'_>> = Vec::new();

    for entry in entries {
        if entry.kind.is_empty() {
            untyped.push(entry);
            continue;
        }
        match groups
            .iter_mut()
            .find(|group| group.kind.eq_ignore_ascii_case(&entry.kind))
        {
            Some(group) => group.entries.push(entry),
            None => groups.push(Group {
                kind: &entry.kind,
                entries: vec![entry],
            }),
        }
    }
    (untyped, groups)
}

/// Renders `entries` as the constants file of `platform`.
///
/// Untyped constants come first, then one block per type.
pub fn render_constants(
    entries: &[ConstantEntry],
    config: &ConstantsConfig,
    platform: Platform,
) -> Result<ConstantsDocument, Error> {
    if entries.is_empty() {
        tracing::warn!(title = %config.title, "no constants to write");
    }

    let (untyped, groups) = group(entries);
    let mut writer = writer::Writer::new(Vec::new(), config, platform);
    writer.write_header()?;
    writer.write_blocks(&untyped, &groups)?;
    writer.write_footer()?;

    let text = String::from_utf8(writer.into_inner())?;
    tracing::debug!(title = %config.title, %platform, bytes = text.len(), "rendered constants");

    Ok(ConstantsDocument {
        title: config.title.clone(),
        path: config.path.clone(),
        platform,
        text,
    })
}
