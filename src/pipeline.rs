//! The whole run: resolve columns, build the table, validate keys, render.
//!
//! Configuration and validation errors abort the run before anything is
//! rendered, so a failed run never yields documents for some languages only.
//! [`weave_constants`] runs the same stages for one constants file.

use crate::{
    builder::TableBuilder,
    config::Config,
    constants::{self, ConstantsBuilder, ConstantsConfig, ConstantsDocument, render_constants},
    diagnostics::Warning,
    error::Error,
    formats::{Document, Table, render},
    validation::validate,
};

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// One document per declared language, in declaration order.
    pub documents: Vec<Document>,
    /// Row warnings first, then render warnings, each in the order found.
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn document(&self, language: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.language == language)
    }
}

/// Runs the pipeline over `tables`, in order, for every language of `config`.
///
/// ```rust
/// use weave::{Config, formats::{Platform, Table}, language::Language, traits::Parser, weave};
///
/// let config = Config::new(Platform::Web, vec![Language::new("en")]);
/// let table = Table::from_str("key,en\nhello,Hello\nbye,Bye\n")?.with_origin("Main");
///
/// let report = weave(&config, &[table])?;
/// assert_eq!(
///     report.documents[0].text,
///     "{\n    \"hello\": \"Hello\",\n    \"bye\": \"Bye\"\n}\n"
/// );
/// # Ok::<(), weave::Error>(())
/// ```
pub fn weave(config: &Config, tables: &[Table]) -> Result<Report, Error> {
    config.validate()?;

    let mut builder = TableBuilder::new(&config.languages, &config.columns);
    for table in tables {
        builder = builder.add_table(table)?;
    }
    let built = builder.build();

    validate(&built.entries)?;

    let options = config.render_options();
    let mut report = Report {
        documents: Vec::with_capacity(config.languages.len()),
        warnings: built.warnings,
    };
    for language in &config.languages {
        let rendered = render(&built.entries, language, config.platform, &options)?;
        report.documents.push(rendered.document);
        report.warnings.extend(rendered.warnings);
    }

    tracing::info!(
        platform = %config.platform,
        entries = built.entries.len(),
        documents = report.documents.len(),
        warnings = report.warnings.len(),
        "strings parsing complete"
    );
    Ok(report)
}

/// The outcome of a successful constants run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantsReport {
    pub document: ConstantsDocument,
    /// Row warnings first, then replaced duplicates.
    pub warnings: Vec<Warning>,
}

/// Builds, filters, validates and renders the constants file described by
/// `constants`, reading `tables` in order. The platform, column names and
/// platform filter come from `config`; its languages are not used.
///
/// ```rust
/// use weave::{Config, constants::ConstantsConfig, formats::{Platform, Table}, traits::Parser};
/// use weave::pipeline::weave_constants;
///
/// let config = Config::new(Platform::Ios, Vec::new());
/// let analytics = ConstantsConfig::new("Analytics").with_top_level_class(false);
/// let table = Table::from_str("key,value\nsign_in,Sign In\n")?;
///
/// let report = weave_constants(&config, &analytics, &[table])?;
/// assert!(report.document.text.ends_with("static let signIn = \"Sign In\"\n"));
/// # Ok::<(), weave::Error>(())
/// ```
pub fn weave_constants(
    config: &Config,
    constants: &ConstantsConfig,
    tables: &[Table],
) -> Result<ConstantsReport, Error> {
    config.columns.validate()?;
    constants.validate(config.platform, &config.columns)?;

    let mut builder = ConstantsBuilder::new(constants, &config.columns);
    for table in tables {
        builder = builder.add_table(table)?;
    }
    let built = builder.build();

    let platform = config.platform_filter.then_some(config.platform);
    let entries = constants::filter_platform(built.entries, platform);
    constants::validate(&entries)?;
    let (entries, replaced) = constants::dedupe(entries);

    let document = render_constants(&entries, constants, config.platform)?;
    let mut warnings = built.warnings;
    warnings.extend(replaced);

    tracing::info!(
        title = %constants.title,
        platform = %config.platform,
        entries = entries.len(),
        warnings = warnings.len(),
        "constants parsing complete"
    );
    Ok(ConstantsReport { document, warnings })
}
