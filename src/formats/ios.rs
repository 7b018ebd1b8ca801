//! Apple `.strings` output.
//!
//! The format has no document header or footer; sections become `/* */`
//! comments and every value is a `"key" = "value";` line.

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
        Ok(())
    }

    fn write_comment(&mut self, comment: &str) -> Result<(), Error> {
        writeln!(self.inner, "\n/*  {comment} */")?;
        Ok(())
    }

    fn write_string(&mut self, key: &str, value: &str, _is_last: bool) -> Result<(), Error> {
        writeln!(self.inner, "\"{}\" = \"{}\";", key, escape(value))?;
        Ok(())
    }

    fn write_footer(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Converts `%s`-style specifiers to the Objective-C object specifier and
/// removes `<html>` markers.
pub fn escape(value: &str) -> String {
    strip_html_tags(&value.replace("%s", "%@").replace("$s", "$@"))
}
