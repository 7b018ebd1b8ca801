//! Non-fatal problems collected while building and rendering a table.
//!
//! Warnings never stop a run. They are returned next to the successful value,
//! in the order they were found, and it is up to the caller to report them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::types::SourceLocator;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The key cell is absent or blank; the row was skipped.
    NoKey,
    /// Every language cell is absent; the row was dropped.
    NoTranslations,
    /// At least one language cell is absent; the row was kept.
    PartialTranslations,
    /// An entry could not be rendered for `language` and was left out of that document.
    RenderFailed { language: String, reason: String },
    /// A constant row has no value; the row was skipped.
    NoValue,
    /// A later constant has the same key and type; this one was dropped.
    DuplicateConstant { key: String, kept: SourceLocator },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Warning {
    #[serde(flatten)]
    pub kind: WarningKind,
    pub locator: SourceLocator,
}

impl Warning {
    pub fn new(kind: WarningKind, locator: SourceLocator) -> Self {
        Self { kind, locator }
    }

    pub fn no_key(locator: SourceLocator) -> Self {
        Self::new(WarningKind::NoKey, locator)
    }

    pub fn no_translations(locator: SourceLocator) -> Self {
        Self::new(WarningKind::NoTranslations, locator)
    }

    pub fn partial_translations(locator: SourceLocator) -> Self {
        Self::new(WarningKind::PartialTranslations, locator)
    }

    pub fn render_failed(
        locator: SourceLocator,
        language: impl Into<String>,
        reason: impl Display,
    ) -> Self {
        Self::new(
            WarningKind::RenderFailed {
                language: language.into(),
                reason: reason.to_string(),
            },
            locator,
        )
    }
}

impl Warning {
    pub fn no_value(locator: SourceLocator) -> Self {
        Self::new(WarningKind::NoValue, locator)
    }

    pub fn duplicate_constant(
        dropped: SourceLocator,
        key: impl Into<String>,
        kept: SourceLocator,
    ) -> Self {
        Self::new(
            WarningKind::DuplicateConstant {
                key: key.into(),
                kept,
            },
            dropped,
        )
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WarningKind::NoKey => {
                write!(f, "{} does not have a key and will not be parsed", self.locator)
            }
            WarningKind::NoTranslations => write!(
                f,
                "{} has no translations so it will not be parsed",
                self.locator
            ),
            WarningKind::PartialTranslations => {
                write!(f, "{} is missing at least one translation", self.locator)
            }
            WarningKind::RenderFailed { language, reason } => write!(
                f,
                "{} could not be written for `{}`: {}",
                self.locator, language, reason
            ),
            WarningKind::NoValue => {
                write!(f, "{} has no value and will not be parsed", self.locator)
            }
            WarningKind::DuplicateConstant { kept, .. } => write!(
                f,
                "{} and {} have the same key and type. The second one will be used",
                self.locator, kept
            ),
        }
    }
}
