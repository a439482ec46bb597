//! # MaxQuant Table Ingestion
//!
//! Reads the tab-delimited `proteinGroups.txt` and `peptides.txt` tables into
//! memory unchanged and extracts the sample identifiers encoded in their
//! intensity column headers.
//!
//! ```text
//!  proteinGroups.txt / peptides.txt
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ RawTable  │  headers + RawRow cells, no interpretation
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ ColumnCatalog │  "Intensity WT_1" → "WT_1", longest first
//!   └──────────────┘
//! ```

mod catalog;
mod raw;


pub use catalog::{extract_identifiers, ColumnCatalog, INTENSITY_PREFIX};
pub use raw::{RawPeptideRow, RawProteinRow, RawRow, RawTable, TableKind};
