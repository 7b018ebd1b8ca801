#![forbid(unsafe_code)]
//! Turns a shared translation spreadsheet into string resources.
//!
//! The spreadsheet is exported as CSV: one `key` column, an optional
//! `platforms` column and one column per language. Each run produces one
//! document per declared language for a single platform.
//!
//! # Quick Start
//!
//! ```rust
//! use weave::{Config, formats::{Platform, Table}, language::Language, traits::Parser, weave};
//!
//! let config = Config::new(Platform::Android, vec![Language::new("en")]);
//! let table = Table::from_str("key,en\n### Greeting,\nhello,Hello!\n")?;
//!
//! let report = weave(&config, &[table])?;
//! assert!(report.documents[0].text.contains(r#"<string name="hello">Hello!</string>"#));
//! # Ok::<(), weave::Error>(())
//! ```
//!
//! # Supported Platforms
//!
//! - **Android**: `strings.xml` resources, with CDATA for `<html>` values
//! - **iOS**: `.strings` files
//! - **Web**: a flat JSON object
//!
//! # Pipeline
//!
//! 1. [`language::resolve_columns`] finds the key, platforms and language columns.
//! 2. [`builder::TableBuilder`] turns rows into [`Entry`] values and collects warnings.
//! 3. [`validation::validate`] rejects illegal or duplicated keys.
//! 4. [`formats::render`] writes one document per language.
//!
//! # Constants
//!
//! The same kind of spreadsheet can also list identifiers, such as analytics
//! event names, with a value and an optional type per row.
//! [`pipeline::weave_constants`] turns it into a Kotlin object, a Swift class
//! or a JSON object. See [`constants`].

pub mod builder;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod language;
pub mod pipeline;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    config::{ColumnNames, Config, RenderOptions},
    constants::{Casing, ConstantsConfig},
    diagnostics::{Warning, WarningKind},
    error::Error,
    formats::{Document, Platform, Table},
    language::Language,
    pipeline::{ConstantsReport, Report, weave, weave_constants},
    types::{Entry, HeaderEntry, SourceLocator, TranslationEntry},
};
