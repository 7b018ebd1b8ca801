//! Decoding of the CSV export of the translation spreadsheet.
//!
//! Quoting and escaping follow RFC 4180. The first record is the header row.
//! Empty cells are decoded as absent, and rows shorter than the header are
//! padded with absent cells so that every row has one cell per header column.

use std::{io::BufRead, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::Parser};

/// One decoded CSV source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Table {
    /// Label used in diagnostics, e.g. the sheet title.
    pub origin: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(
        origin: impl Into<String>,
        header: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        Self {
            origin: origin.into(),
            header,
            rows,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}

impl Parser for Table {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect();
            if row.len() < header.len() {
                row.resize(header.len(), None);
            }
            rows.push(row);
        }

        Ok(Table {
            origin: String::new(),
            header,
            rows,
        })
    }

    /// Reads the file and labels the table with the file stem.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(std::io::BufReader::new(file))?;
        let origin = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(table.with_origin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    #[test]
    fn test_parse_header_and_rows() {
        let csv_content = "key,platforms,en,fr\nhello,,Hello!,Bonjour!\nbye,android,Bye,Au revoir\n";
        let table = Table::from_str(csv_content).unwrap();
        assert_eq!(table.header, vec!["key", "platforms", "en", "fr"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0],
            vec![
                Some("hello".to_string()),
                None,
                Some("Hello!".to_string()),
                Some("Bonjour!".to_string()),
            ]
        );
        assert_eq!(table.rows[1][1].as_deref(), Some("android"));
    }

    #[test]
    fn test_quoted_cells_keep_commas_and_newlines() {
        let csv_content = "key,en\n\"greeting\",\"Hello, \"\"world\"\"\nagain\"\n";
        let table = Table::from_str(csv_content).unwrap();
        assert_eq!(
            table.rows[0][1].as_deref(),
            Some("Hello, \"world\"\nagain")
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv_content = "key,en,fr\nhello,Hello\n";
        let table = Table::from_str(csv_content).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], None);
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let table = Table::from_str("").unwrap();
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_with_origin() {
        let table = Table::from_str("key,en\n").unwrap().with_origin("Main");
        assert_eq!(table.origin, "Main");
    }
}
