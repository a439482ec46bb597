use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::error::{PrepError, Result};

/// Which MaxQuant result table a [`RawTable`] was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// `proteinGroups.txt`
    Proteins,
    /// `peptides.txt`
    Peptides,
}

impl TableKind {
    /// File name of the table inside the `txt` directory
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Proteins => "proteinGroups.txt",
            TableKind::Peptides => "peptides.txt",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// One row as read from a source table, with every original cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<String>,
}

/// Row of `proteinGroups.txt`
pub type RawProteinRow = RawRow;

/// Row of `peptides.txt`
pub type RawPeptideRow = RawRow;

impl RawRow {
    /// Build a row from its cells, in column order
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, or an empty string past the end of a short row
    pub fn get(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// All cells in column order
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// A wide-format MaxQuant table held fully in memory
#[derive(Debug, Clone)]
pub struct RawTable {
    kind: TableKind,
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a table from already-split headers and rows
    pub fn new(kind: TableKind, headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            kind,
            headers,
            rows,
        }
    }

    /// Parse a tab-delimited table from a file
    pub fn from_tsv_file<P: AsRef<Path>>(path: P, kind: TableKind) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PrepError::MissingFile(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file), kind)?;
        debug!(
            "{} shape: ({}, {})",
            kind,
            table.rows.len(),
            table.headers.len()
        );
        Ok(table)
    }

    /// Parse a tab-delimited table from a reader
    pub fn from_reader<R: Read>(reader: R, kind: TableKind) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(PrepError::data_format(format!("{kind} has no header row")));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut cells: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            cells.resize(width, String::new());
            rows.push(RawRow::new(cells));
        }

        Ok(Self {
            kind,
            headers,
            rows,
        })
    }

    /// Source table of this data
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows in file order
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named exactly `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column that must be present
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            PrepError::data_format(format!("{} is missing required column '{}'", self.kind, name))
        })
    }
}
