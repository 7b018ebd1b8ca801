//! All error types for the weave crate.
//!
//! Configuration and validation errors are fatal for a whole run: when one of
//! them is returned no document is produced for any language. Row-level and
//! render-level problems are reported as [`crate::diagnostics::Warning`]s instead.

use thiserror::Error;

use crate::types::SourceLocator;

#[derive(Error, Debug)]
pub enum Error {
    #[error("there must be a column named `{column}` with the string keys in {origin}")]
    MissingKeyColumn { column: String, origin: String },

    #[error("`{language}` in {origin} does not have any translations")]
    MissingLanguageColumn { language: String, origin: String },

    #[error("there must be a column named `{column}` with the constant values in {origin}")]
    MissingValueColumn { column: String, origin: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("the platform must be Android, iOS, or Web, got `{0}`")]
    UnknownPlatform(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{locator} has an empty key")]
    EmptyKey { locator: SourceLocator },

    #[error("{locator} contains some illegal characters in its key `{key}`")]
    IllegalKeyCharacter { key: String, locator: SourceLocator },

    #[error("{first} and {second} have the same key `{key}`")]
    DuplicateKey {
        key: String,
        first: SourceLocator,
        second: SourceLocator,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendered document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// True for errors detected while reading the configuration or resolving
    /// the header row, before any data row is looked at.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingKeyColumn { .. }
                | Error::MissingLanguageColumn { .. }
                | Error::MissingValueColumn { .. }
                | Error::InvalidConfig(_)
                | Error::UnknownPlatform(_)
                | Error::Config(_)
        )
    }

    /// True for key integrity failures found by [`crate::validation::validate`].
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyKey { .. } | Error::IllegalKeyCharacter { .. } | Error::DuplicateKey { .. }
        )
    }
}
