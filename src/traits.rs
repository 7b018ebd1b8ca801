//! Traits for reading translation sources and writing platform documents.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::error::Error;

/// A trait for decoding a translation source from one file.
///
/// # Example
///
/// ```rust,no_run
/// use weave::{formats::Table, traits::Parser};
/// let table = Table::read_from("strings.csv")?;
/// println!("{} rows from {}", table.rows.len(), table.origin);
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// Line-oriented emitter for one platform's document.
///
/// Values passed to [`DocumentWriter::write_string`] have already gone through
/// the shared preprocessing; each platform applies its own escaping on top.
pub trait DocumentWriter {
    fn write_header(&mut self) -> Result<(), Error>;

    /// Writes a section comment. Platforms without comments write nothing.
    fn write_comment(&mut self, comment: &str) -> Result<(), Error>;

    /// Writes one key/value pair. `is_last` is true for the last entry that
    /// will be rendered in the document.
    fn write_string(&mut self, key: &str, value: &str, is_last: bool) -> Result<(), Error>;

    fn write_footer(&mut self) -> Result<(), Error>;
}
