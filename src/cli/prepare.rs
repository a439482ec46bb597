use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mqprep::output::write_cleaned_tsv;
use mqprep::pipeline::run_analysis;
use mqprep::settings::FsSettingsLocator;

use super::RunArgs;

/// Full preparation run over a MaxQuant output directory
pub fn run(args: RunArgs, output: Option<PathBuf>) -> Result<()> {
    let layout = args.layout();
    let analysis = run_analysis(
        &layout,
        &args.source(),
        &FsSettingsLocator,
        args.options(),
        true,
    )
    .with_context(|| format!("Failed to prepare {}", layout.run_dir().display()))?;

    let resolution = &analysis.tables.resolution;
    let summary = analysis.tables.proteins.summary;

    println!("mqprep Preparation");
    println!("==================");
    println!("Run: {}", layout.run_dir().display());
    println!("Settings: {}", analysis.settings_source.display());
    println!();

    println!("Experiments ({:?}):", resolution.mode);
    for group in resolution.replicates.groups() {
        println!("  {} ({}): {}", group.name, group.replicates.len(), group.replicates.join(", "));
    }
    if !resolution.ambiguities.is_empty() {
        println!("  {} ambiguous cluster keys, see log", resolution.ambiguities.len());
    }
    println!();

    println!("Protein Table:");
    println!("  Input rows: {}", summary.input_rows);
    println!("  Contaminants removed: {}", summary.contaminants_removed);
    println!("  Duplicate genes removed: {}", summary.duplicate_genes_removed);
    println!("  Output rows: {}", summary.output_rows);
    println!("Peptide rows: {}", analysis.peptides.len());

    if let Some(path) = &analysis.settings_written {
        info!("Settings written to {}", path.display());
    }

    if let Some(path) = output {
        write_cleaned_tsv(&path, &analysis.tables.proteins)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!();
        println!("Cleaned table written to {}", path.display());
    }

    Ok(())
}
