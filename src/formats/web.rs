//! Web JSON output: one flat object of key/value pairs.
//!
//! Section headers are not emitted. Every pair but the last one ends with a comma.
//!
//! Values are written as they come out of the shared preprocessing, which only
//! escapes double quotes. A backslash in the spreadsheet is copied through as is,
//! so a value such as `C:\dir` does not yield valid JSON.

use std::io::Write;

use crate::{error::Error, formats::strip_html_tags, traits::DocumentWriter};

pub struct Writer<W: Write> {
    inner: W,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> DocumentWriter for Writer<W> {
    fn write_header(&mut self) -> Result<(), Error> {
        writeln!(self.inner, "{{")?;
        Ok(())
    }

    fn write_comment(&mut self, _comment: &str) -> Result<(), Error> {
        Ok(())
    }

    fn write_string(&mut self, key: &str, value: &str, is_last: bool) -> Result<(), Error> {
        let separator = if is_last { "" } else { "," };
        writeln!(
            self.inner,
            "    \"{}\": \"{}\"{}",
            key,
            strip_html_tags(value),
            separator
        )?;
        Ok(())
    }

    fn write_footer(&mut self) -> Result<(), Error> {
        writeln!(self.inner, "}}")?;
        Ok(())
    }
}
