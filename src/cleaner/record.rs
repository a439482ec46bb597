use std::collections::HashSet;

use serde::Serialize;

use super::Intensity;

/// A protein group that survived cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinRecord {
    pub protein_id: String,
    /// Upper-case gene symbol; unique among all records of a table
    pub gene_name: Option<String>,
    pub protein_name: String,
    /// Aligned with [`CleanedProteinTable::intensity_columns`]
    pub intensities: Vec<Intensity>,
    /// Remaining original cells, aligned with
    /// [`CleanedProteinTable::attribute_columns`]
    pub attributes: Vec<String>,
}

/// Row counts of each cleaning step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    pub input_rows: usize,
    pub contaminants_removed: usize,
    pub duplicate_genes_removed: usize,
    pub output_rows: usize,
}

/// The canonical protein table handed to downstream analysis
#[derive(Debug, Clone, Default)]
pub struct CleanedProteinTable {
    /// Original non-intensity columns, in file order
    pub attribute_columns: Vec<String>,
    /// Intensity columns, in file order
    pub intensity_columns: Vec<String>,
    pub records: Vec<ProteinRecord>,
    pub summary: CleaningSummary,
}

impl CleanedProteinTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record carrying gene symbol `gene_name`
    pub fn by_gene(&self, gene_name: &str) -> Option<&ProteinRecord> {
        self.records
            .iter()
            .find(|r| r.gene_name.as_deref() == Some(gene_name))
    }

    /// Value of intensity column `column` in `record`
    pub fn intensity(&self, record: &ProteinRecord, column: &str) -> Option<Intensity> {
        let index = self.intensity_columns.iter().position(|c| c == column)?;
        record.intensities.get(index).copied()
    }

    /// Original cell of non-intensity column `column` in `record`
    pub fn attribute<'a>(&self, record: &'a ProteinRecord, column: &str) -> Option<&'a str> {
        let index = self.attribute_columns.iter().position(|c| c == column)?;
        record.attributes.get(index).map(String::as_str)
    }

    /// Whether no two records share a gene symbol
    pub fn gene_names_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.gene_name.as_deref())
            .all(|g| seen.insert(g))
    }
}
