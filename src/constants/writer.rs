use std::io::Write;

use crate::{
    constants::{ConstantEntry, ConstantsConfig, GENERATED_HEADER, Group},
    error::Error,
    formats::{Platform, preprocess},
};

const INDENT: usize = 4;

pub(crate) struct Writer<'c, W: Write> {
    inner: W,
    config: &'c ConstantsConfig,
    platform: Platform,
}

impl<'c, W: Write> Writer<'c, W> {
    pub fn new(inner: W, config: &'c ConstantsConfig, platform: Platform) -> Self {
        Self {
            inner,
            config,
            platform,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Everything before the first constant, including the opening line of the
    /// top-level class when there is one.
    pub fn write_header(&mut self) -> Result<(), Error> {
        let top_level = self.config.top_level_class;
        match self.platform {
            Platform::Android => {
                writeln!(
                    self.inner,
                    "package {}",
                    self.config.package_name.as_deref().unwrap_or_default()
                )?;
                writeln!(self.inner)?;
                writeln!(self.inner, "/**")?;
                writeln!(self.inner, " * {GENERATED_HEADER}")?;
                writeln!(self.inner, " */")?;
                if top_level {
                    writeln!(self.inner, "object {} {{", self.config.object_name())?;
                }
            }
            Platform::Ios => {
                writeln!(self.inner, "//  {GENERATED_HEADER}")?;
                if top_level {
                    writeln!(self.inner)?;
                    writeln!(self.inner, "class {} {{", self.config.object_name())?;
                }
            }
            Platform::Web => writeln!(self.inner, "{{")?,
        }
        Ok(())
    }

    pub fn write_blocks(
        &mut self,
        untyped: &[&ConstantEntry],
        groups: &[Group<'_>],
    ) -> Result<(), Error> {
        let blocks = usize::from(!untyped.is_empty()) + groups.len();
        let mut written = 0;

        if !untyped.is_empty() {
            written += 1;
            self.write_block(None, untyped, written == blocks)?;
        }
        for group in groups {
            written += 1;
            self.write_block(Some(group.kind), &group.entries, written == blocks)?;
        }
        Ok(())
    }

    pub fn write_footer(&mut self) -> Result<(), Error> {
        if self.platform == Platform::Web || self.config.top_level_class {
            writeln!(self.inner, "}}")?;
        }
        Ok(())
    }

    fn base_indent(&self) -> usize {
        if self.platform == Platform::Web || self.config.top_level_class {
            INDENT
        } else {
            0
        }
    }

    /// Mobile blocks are separated by a blank line. On Web every block but the
    /// last one ends with a comma.
    fn write_block(
        &mut self,
        kind: Option<&str>,
        entries: &[&ConstantEntry],
        is_last_block: bool,
    ) -> Result<(), Error> {
        let indent = self.base_indent();
        if self.platform != Platform::Web {
            writeln!(self.inner)?;
        }

        let Some(kind) = kind else {
            for (index, entry) in entries.iter().enumerate() {
                let is_last = is_last_block && index + 1 == entries.len();
                self.write_constant(entry, indent, is_last)?;
            }
            return Ok(());
        };

        let pad = " ".repeat(indent);
        match self.platform {
            Platform::Android => writeln!(
                self.inner,
                "{pad}object {} {{",
                self.config.type_casing.apply(kind)
            )?,
            Platform::Ios => writeln!(
                self.inner,
                "{pad}enum {} {{",
                self.config.type_casing.apply(kind)
            )?,
            Platform::Web => writeln!(self.inner, "{pad}\"{}\": {{", kind.to_lowercase())?,
        }
        for (index, entry) in entries.iter().enumerate() {
            self.write_constant(entry, indent + INDENT, index + 1 == entries.len())?;
        }
        let separator = if self.platform == Platform::Web && !is_last_block {
            ","
        } else {
            ""
        };
        writeln!(self.inner, "{pad}}}{separator}")?;
        Ok(())
    }

    fn write_constant(
        &mut self,
        entry: &ConstantEntry,
        indent: usize,
        is_last: bool,
    ) -> Result<(), Error> {
        let pad = " ".repeat(indent);
        let value = preprocess(&entry.value);

        let keyword = match self.platform {
            Platform::Web => {
                let separator = if is_last { "" } else { "," };
                writeln!(self.inner, "{pad}\"{}\": \"{}\"{}", entry.key, value, separator)?;
                return Ok(());
            }
            Platform::Android => "const val",
            Platform::Ios => "static let",
        };

        let declaration = format!("{pad}{keyword} {}", self.config.key_casing.apply(&entry.key));
        let spaces = self
            .config
            .values_align_column
            .saturating_sub(declaration.chars().count())
            .max(1);
        let value = match self.platform {
            Platform::Android => value.replace('$', "\\$"),
            _ => value,
        };
        writeln!(
            self.inner,
            "{declaration}{}= \"{value}\"",
            " ".repeat(spaces)
        )?;
        Ok(())
    }
}
