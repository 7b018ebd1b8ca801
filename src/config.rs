//! Run configuration: target platform, declared languages and column names.
//!
//! The configuration is plain serde data so that a caller can load it from
//! whatever source it likes; [`Config::from_json`] covers the JSON layout the
//! tool has always used:
//!
//! ```rust
//! use weave::{Config, formats::Platform};
//!
//! let config = Config::from_json(r#"{
//!     "platform": "android",
//!     "languages": [
//!         { "id": "en", "path": "values/strings.xml" },
//!         { "id": "fr", "path": "values-fr/strings.xml" }
//!     ]
//! }"#)?;
//! assert_eq!(config.platform, Platform::Android);
//! assert_eq!(config.columns.key, "key");
//! # Ok::<(), weave::Error>(())
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{constants::ConstantsConfig, error::Error, formats::Platform, language::Language};

pub(crate) fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub platform: Platform,

    /// Languages to produce a document for, in output order.
    pub languages: Vec<Language>,

    #[serde(default)]
    pub columns: ColumnNames,

    /// Whether the `platforms` column restricts entries to some platforms.
    #[serde(default = "default_true")]
    pub platform_filter: bool,

    /// Constants files generated from the same kind of spreadsheet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<ConstantsConfig>,
}

impl Config {
    pub fn new(platform: Platform, languages: Vec<Language>) -> Self {
        Self {
            platform,
            languages,
            columns: ColumnNames::default(),
            platform_filter: true,
            constants: Vec::new(),
        }
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_platform_filter(mut self, platform_filter: bool) -> Self {
        self.platform_filter = platform_filter;
        self
    }

    pub fn with_constants(mut self, constants: Vec<ConstantsConfig>) -> Self {
        self.constants = constants;
        self
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().with_platform_filter(self.platform_filter)
    }

    /// Checks what serde cannot: at least one language, unique language ids,
    /// non-blank column names and usable constants configurations.
    pub fn validate(&self) -> Result<(), Error> {
        if self.languages.is_empty() {
            return Err(Error::InvalidConfig(
                "please provide at least one language".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for language in &self.languages {
            if language.id.trim().is_empty() {
                return Err(Error::InvalidConfig("language id is empty".to_string()));
            }
            if !seen.insert(language.id.trim().to_lowercase()) {
                return Err(Error::InvalidConfig(format!(
                    "language `{}` is declared more than once",
                    language.id
                )));
            }
        }

        self.columns.validate()?;
        for constants in &self.constants {
            constants.validate(self.platform, &self.columns)?;
        }
        Ok(())
    }
}

/// Names of the reserved header cells. Matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnNames {
    pub key: String,
    pub platforms: String,
    /// Prefix of a key cell that turns the row into a section header.
    pub header_marker: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            key: "key".to_string(),
            platforms: "platforms".to_string(),
            header_marker: "###".to_string(),
        }
    }
}

impl ColumnNames {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("key", &self.key),
            ("platforms", &self.platforms),
            ("headerMarker", &self.header_marker),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("`{name}` must not be blank")));
            }
        }
        if self.key.eq_ignore_ascii_case(&self.platforms) {
            return Err(Error::InvalidConfig(
                "the key and platforms columns must have different names".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for [`crate::formats::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Skip entries whose platform list does not contain the rendered platform.
    pub platform_filter: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            platform_filter: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform_filter(mut self, platform_filter: bool) -> Self {
        self.platform_filter = platform_filter;
        self
    }
}
