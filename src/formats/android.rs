//! Android `strings.xml` output.
//!
//! Values are escaped by hand rather than by the XML writer: Android resource
//! strings need backslash escapes for apostrophes and at-signs, and values
//! marked with `<html>` are emitted as CDATA with their markup untouched.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::{
    error::Error,
    formats::{HTML_END_TAG, HTML_START_TAG},
    traits::DocumentWriter,
};

const INDENT: &str = "    ";

pub struct Writer<W: Write> {
    xml: quick_xml::Writer<W>,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            xml: quick_xml::Writer::new(inner),
        }
    }

    pub fn into_inner(self) -> W {
        self.xml.into_inner()
    }

    fn text(&mut self, text: &str) -> Result<(), Error> {
        self.xml.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }
}

impl<W: Write> DocumentWriter for Writer<W> {
    fn write_header(&mut self) -> Result<(), Error> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.text("\n")?;
        self.xml
            .write_event(Event::Start(BytesStart::new("resources")))?;
        self.text("\n")
    }

    fn write_comment(&mut self, comment: &str) -> Result<(), Error> {
        self.text("\n")?;
        self.text(INDENT)?;
        self.xml
            .write_event(Event::Comment(BytesText::from_escaped(format!(" {comment} "))))?;
        self.text("\n")
    }

    fn write_string(&mut self, key: &str, value: &str, _is_last: bool) -> Result<(), Error> {
        let mut elem = BytesStart::new("string");
        elem.push_attribute(("name", key));

        self.text(INDENT)?;
        self.xml.write_event(Event::Start(elem))?;
        self.xml
            .write_event(Event::Text(BytesText::from_escaped(escape(value))))?;
        self.xml.write_event(Event::End(BytesEnd::new("string")))?;
        self.text("\n")
    }

    fn write_footer(&mut self) -> Result<(), Error> {
        self.xml.write_event(Event::End(BytesEnd::new("resources")))?;
        self.text("\n")
    }
}

/// Android escaping of an already preprocessed value.
pub fn escape(value: &str) -> String {
    let value = value
        .replace('&', "&amp;")
        .replace('\'', "\\'")
        .replace('@', "\\@")
        .replace("...", "&#8230;");

    if HTML_START_TAG.is_match(&value) {
        // Markup inside the CDATA section is kept as is.
        let value = HTML_START_TAG.replace_all(&value, "<![CDATA[");
        HTML_END_TAG.replace_all(&value, "]]>").into_owned()
    } else {
        value.replace('>', "&gt;").replace('<', "&lt;")
    }
}
