//! TSV export of the cleaned protein table.
//!
//! Columns are the original non-intensity columns, then the intensity
//! columns, then the three derived FASTA columns.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::cleaner::CleanedProteinTable;
use crate::error::Result;

/// Derived column holding the protein accession
pub const PROTEIN_ID_COLUMN: &str = "protein id";
/// Derived column holding the upper-case gene symbol
pub const GENE_NAME_COLUMN: &str = "Gene name fasta";
/// Derived column holding the protein name
pub const PROTEIN_NAME_COLUMN: &str = "Protein name";

/// Write `table` as tab-separated text
pub fn write_cleaned<W: Write>(writer: W, table: &CleanedProteinTable) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    let header = table
        .attribute_columns
        .iter()
        .chain(&table.intensity_columns)
        .map(String::as_str)
        .chain([PROTEIN_ID_COLUMN, GENE_NAME_COLUMN, PROTEIN_NAME_COLUMN]);
    csv_writer.write_record(header)?;

    for record in &table.records {
        let row = record
            .attributes
            .iter()
            .cloned()
            .chain(record.intensities.iter().map(|v| v.to_string()))
            .chain([
                record.protein_id.clone(),
                record.gene_name.clone().unwrap_or_default(),
                record.protein_name.clone(),
            ]);
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `table` to a TSV file at `path`
pub fn write_cleaned_tsv<P: AsRef<Path>>(path: P, table: &CleanedProteinTable) -> Result<()> {
    let file = File::create(path)?;
    write_cleaned(file, table)
}
