use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::error::{PrepError, Result};
use crate::layout::AnalysisLayout;

/// Name list documents used by downstream analysis
pub const NAME_LIST_FILES: [&str; 3] = [
    "important_protein_names.tsv",
    "important_receptor_names.tsv",
    "go_analysis_gene_names.tsv",
];

/// Locations of the name lists inside the run's `config` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameListPaths {
    pub important_proteins: PathBuf,
    pub important_receptors: PathBuf,
    pub go_analysis_genes: PathBuf,
}

/// Make sure every name list exists in the run's `config` directory.
///
/// A list already present there is used as is. Otherwise the packaged
/// default is copied in. A list found in neither place is a missing file.
pub fn materialize_name_lists(layout: &AnalysisLayout) -> Result<NameListPaths> {
    let [important_proteins, important_receptors, go_analysis_genes] =
        NAME_LIST_FILES.map(|name| materialize(layout, name));
    Ok(NameListPaths {
        important_proteins: important_proteins?,
        important_receptors: important_receptors?,
        go_analysis_genes: go_analysis_genes?,
    })
}

fn materialize(layout: &AnalysisLayout, name: &str) -> Result<PathBuf> {
    let config_dir = layout.config_dir();
    let local = config_dir.join(name);
    if local.is_file() {
        debug!("Loading {} from {}", name, config_dir.display());
        return Ok(local);
    }

    let packaged = layout.defaults_dir().join(name);
    if !packaged.is_file() {
        return Err(PrepError::MissingFile(packaged));
    }
    debug!(
        "Loading {} from {}. Copying file to {}",
        name,
        layout.defaults_dir().display(),
        config_dir.display()
    );
    fs::create_dir_all(&config_dir)?;
    fs::copy(&packaged, &local)?;
    Ok(local)
}
