//! Output platforms and document rendering.
//!
//! Rendering is a pure function of the validated entries, the language and the
//! platform: the same input always yields byte-identical text. Every value is
//! trimmed and goes through [`preprocess`] before the platform's own escaping.

pub mod android;
pub mod csv;
pub mod ios;
pub mod web;

use std::{fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Reexporting the source table for easier access
pub use self::csv::Table;

use crate::{
    config::RenderOptions,
    diagnostics::Warning,
    error::Error,
    language::Language,
    traits::DocumentWriter,
    types::{Entry, TranslationEntry},
};

lazy_static! {
    pub(crate) static ref HTML_START_TAG: Regex = Regex::new(r"(?i)<html>").unwrap();
    pub(crate) static ref HTML_END_TAG: Regex = Regex::new(r"(?i)</html>").unwrap();
}

/// Target string-resource format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    /// `strings.xml` resources.
    Android,
    /// `Localizable.strings` files.
    Ios,
    /// A flat JSON object.
    Web,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Android, Platform::Ios, Platform::Web];

    /// Lowercased identifier matched against the `platforms` column.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Platform::Android => "xml",
            Platform::Ios => "strings",
            Platform::Web => "json",
        }
    }

    /// Web keeps entries with an empty value so every key exists in every
    /// language; the mobile platforms fall back to their base language instead.
    pub fn renders_blank_values(&self) -> bool {
        matches!(self, Platform::Web)
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
            Platform::Web => "Web",
        })
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownPlatform(s.to_string()))
    }
}

impl TryFrom<String> for Platform {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.to_string()
    }
}

/// The rendered text for one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    pub language: String,
    /// Copied from the declared language; writing the file is up to the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub platform: Platform,
    pub text: String,
}

/// A document plus the entries that could not be written into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub document: Document,
    pub warnings: Vec<Warning>,
}

/// Shared preprocessing, in this order: escape double quotes, turn `(c)`
/// into `©`, drop line breaks.
pub fn preprocess(value: &str) -> String {
    value
        .replace('"', "\\\"")
        .replace("(c)", "\u{a9}")
        .replace(['\n', '\r'], "")
}

/// Removes `<html>` and `</html>` markers in any letter case.
pub(crate) fn strip_html_tags(value: &str) -> String {
    let value = HTML_START_TAG.replace_all(value, "");
    HTML_END_TAG.replace_all(&value, "").into_owned()
}

/// Renders `entries` as the `platform` document for `language`.
///
/// Entries that fail to render are left out and reported as warnings; only a
/// failure in the document header or footer is an error.
pub fn render(
    entries: &[Entry],
    language: &Language,
    platform: Platform,
    options: &RenderOptions,
) -> Result<Rendered, Error> {
    let (bytes, warnings) = match platform {
        Platform::Android => {
            let mut writer = android::Writer::new(Vec::new());
            let warnings = write_document(&mut writer, entries, language, platform, options)?;
            (writer.into_inner(), warnings)
        }
        Platform::Ios => {
            let mut writer = ios::Writer::new(Vec::new());
            let warnings = write_document(&mut writer, entries, language, platform, options)?;
            (writer.into_inner(), warnings)
        }
        Platform::Web => {
            let mut writer = web::Writer::new(Vec::new());
            let warnings = write_document(&mut writer, entries, language, platform, options)?;
            (writer.into_inner(), warnings)
        }
    };

    let text = String::from_utf8(bytes)?;
    tracing::debug!(
        language = %language.id,
        %platform,
        bytes = text.len(),
        skipped = warnings.len(),
        "rendered document"
    );

    Ok(Rendered {
        document: Document {
            language: language.id.clone(),
            path: language.path.clone(),
            platform,
            text,
        },
        warnings,
    })
}

fn write_document<D: DocumentWriter>(
    writer: &mut D,
    entries: &[Entry],
    language: &Language,
    platform: Platform,
    options: &RenderOptions,
) -> Result<Vec<Warning>, Error> {
    // Headers never count: the trailing-comma rule is about key/value lines only.
    let last = entries.iter().rposition(|entry| {
        entry
            .as_translation()
            .and_then(|t| renderable_value(t, language, platform, options))
            .is_some()
    });

    writer.write_header()?;

    let mut warnings = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let result = match entry {
            Entry::Header(header) => writer.write_comment(&header.comment),
            Entry::Translation(translation) => {
                match renderable_value(translation, language, platform, options) {
                    Some(value) => writer.write_string(
                        &translation.key,
                        &preprocess(value),
                        Some(index) == last,
                    ),
                    None => continue,
                }
            }
        };

        if let Err(error) = result {
            let warning = Warning::render_failed(entry.locator().clone(), &language.id, &error);
            tracing::debug!(%warning, "skipped entry");
            warnings.push(warning);
        }
    }

    writer.write_footer()?;
    Ok(warnings)
}

/// The trimmed value to write for `entry`, or `None` when the entry is
/// filtered out for this platform or has nothing to show in this language.
fn renderable_value<'e>(
    entry: &'e TranslationEntry,
    language: &Language,
    platform: Platform,
    options: &RenderOptions,
) -> Option<&'e str> {
    if options.platform_filter && !entry.is_for_platform(platform.id()) {
        return None;
    }
    let value = entry.translation(&language.id).unwrap_or("").trim();
    if value.is_empty() && !platform.renders_blank_values() {
        return None;
    }
    Some(value)
}
