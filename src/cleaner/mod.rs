//! # Protein Table Cleaning
//!
//! Turns the raw `proteinGroups.txt` rows into [`ProteinRecord`]s:
//!
//! 1. **Contaminant filter**: rows flagged `+` in any of the three quality
//!    columns are dropped.
//! 2. **Header decomposition**: the first FASTA header entry is split into
//!    protein id, gene name and protein name.
//! 3. **Gene uniqueness**: every row whose gene name occurs more than once is
//!    dropped; rows without a gene name are kept.
//! 4. **Numeric coercion**: intensity columns that are not numeric as written
//!    are parsed with the decimal-comma rule.

mod fasta;
mod intensity;
mod record;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::Result;
use crate::table::{RawProteinRow, RawTable};

pub use fasta::{parse_composite_header, FastaHeader};
pub use intensity::{coerce_column, coerce_decimal_comma, column_encoding, ColumnEncoding, Intensity};
pub use record::{CleanedProteinTable, CleaningSummary, ProteinRecord};

/// Marker value of a set quality flag
pub const CONTAMINANT_MARKER: &str = "+";

/// Column names the cleaner relies on
#[derive(Debug, Clone)]
pub struct CleanerConfig {
    /// Quality flag columns; a `+` in any of them marks a contaminant
    pub contaminant_columns: [String; 3],
    /// Column holding `;`-separated FASTA headers
    pub composite_header_column: String,
    /// Substring identifying intensity columns
    pub intensity_marker: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            contaminant_columns: [
                "Only identified by site".to_string(),
                "Reverse".to_string(),
                "Potential contaminant".to_string(),
            ],
            composite_header_column: "Fasta headers".to_string(),
            // matches both "Intensity ..." and "LFQ intensity ..."
            intensity_marker: "ntensity".to_string(),
        }
    }
}

/// Cleans a raw protein table into canonical records
#[derive(Debug, Clone, Default)]
pub struct ProteinTableCleaner {
    config: CleanerConfig,
}

impl ProteinTableCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Run all cleaning steps over `table`
    pub fn clean(&self, table: &RawTable) -> Result<CleanedProteinTable> {
        let flag_indices = self
            .config
            .contaminant_columns
            .iter()
            .map(|c| table.require_column(c))
            .collect::<Result<Vec<_>>>()?;
        let header_index = table.require_column(&self.config.composite_header_column)?;

        let mut summary = CleaningSummary {
            input_rows: table.len(),
            ..Default::default()
        };

        let rows = self.remove_contaminants(table.rows(), &flag_indices);
        summary.contaminants_removed = table.len() - rows.len();
        debug!(
            "Removing {} rows from {} because they are marked as contaminant",
            summary.contaminants_removed,
            table.kind()
        );

        let headers = rows
            .iter()
            .map(|row| parse_composite_header(row.get(header_index)))
            .collect::<Result<Vec<_>>>()?;

        let (rows, headers) = Self::remove_duplicate_genes(rows, headers);
        summary.duplicate_genes_removed =
            table.len() - summary.contaminants_removed - rows.len();
        if summary.duplicate_genes_removed > 0 {
            warn!(
                "Found duplicates in gene name column. Dropping all {} duplicates.",
                summary.duplicate_genes_removed
            );
        }

        let (intensity_indices, attribute_indices): (Vec<usize>, Vec<usize>) = (0..table
            .headers()
            .len())
            .partition(|i| table.headers()[*i].contains(&self.config.intensity_marker));

        let mut columns = Vec::with_capacity(intensity_indices.len());
        for &index in &intensity_indices {
            let name = &table.headers()[index];
            let (encoding, values) = coerce_column(name, rows.iter().map(|r| r.get(index)))?;
            if encoding == ColumnEncoding::DecimalComma {
                debug!("converted decimal-comma column '{name}' to integers");
            }
            columns.push(values);
        }

        let records: Vec<ProteinRecord> = rows
            .iter()
            .zip(headers)
            .enumerate()
            .map(|(row_index, (row, header))| {
                let attributes = attribute_indices
                    .iter()
                    .map(|&i| {
                        if i == header_index {
                            row.get(i).split(';').next().unwrap_or_default().to_string()
                        } else {
                            row.get(i).to_string()
                        }
                    })
                    .collect();
                ProteinRecord {
                    protein_id: header.protein_id,
                    gene_name: header.gene_name,
                    protein_name: header.protein_name,
                    intensities: columns.iter().map(|c| c[row_index]).collect(),
                    attributes,
                }
            })
            .collect();

        summary.output_rows = records.len();
        debug!(
            "{} shape after preprocessing: ({}, {})",
            table.kind(),
            records.len(),
            table.headers().len() + 3
        );

        Ok(CleanedProteinTable {
            attribute_columns: attribute_indices
                .iter()
                .map(|&i| table.headers()[i].clone())
                .collect(),
            intensity_columns: intensity_indices
                .iter()
                .map(|&i| table.headers()[i].clone())
                .collect(),
            records,
            summary,
        })
    }

    fn remove_contaminants<'a>(
        &self,
        rows: &'a [RawProteinRow],
        flag_indices: &[usize],
    ) -> Vec<&'a RawProteinRow> {
        rows.iter()
            .filter(|row| {
                !flag_indices
                    .iter()
                    .any(|&i| row.get(i).trim() == CONTAMINANT_MARKER)
            })
            .collect()
    }

    /// Drop every row whose gene name is not unique
    fn remove_duplicate_genes<'a>(
        rows: Vec<&'a RawProteinRow>,
        headers: Vec<FastaHeader>,
    ) -> (Vec<&'a RawProteinRow>, Vec<FastaHeader>) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for gene in headers.iter().filter_map(|h| h.gene_name.as_ref()) {
            *counts.entry(gene.clone()).or_default() += 1;
        }

        rows.into_iter()
            .zip(headers)
            .filter(|(_, header)| match &header.gene_name {
                Some(gene) => counts.get(gene).copied().unwrap_or_default() == 1,
                None => true,
            })
            .unzip()
    }
}
