use anyhow::{Context, Result};
use log::info;
use serde_json::json;

use mqprep::design::{DesignMode, Resolution};
use mqprep::layout::AnalysisLayout;
use mqprep::pipeline::{Pipeline, SampleIdentifiers};
use mqprep::settings::{resolve_settings, FsSettingsLocator, Settings};

use super::RunArgs;

/// A resolved design together with everything it was resolved from
pub(super) struct LoadedDesign {
    pub layout: AnalysisLayout,
    pub settings: Settings,
    pub pipeline: Pipeline,
    pub identifiers: SampleIdentifiers,
    pub resolution: Resolution,
}

/// Load settings and tables of a run and resolve its replicate map
pub(super) fn load(args: &RunArgs) -> Result<LoadedDesign> {
    let layout = args.layout();
    let (settings, _) = resolve_settings(&args.source(), &layout, &FsSettingsLocator)
        .context("Failed to load settings")?;
    let (proteins, peptides) = layout
        .load_tables()
        .with_context(|| format!("Failed to read tables of {}", layout.run_dir().display()))?;

    let pipeline = Pipeline::new(args.options());
    let identifiers = pipeline.identifiers(&proteins, &peptides)?;
    let resolution = pipeline
        .infer_or_load(&settings, &identifiers)
        .context("Failed to resolve the experimental design")?;

    Ok(LoadedDesign {
        layout,
        settings,
        pipeline,
        identifiers,
        resolution,
    })
}

/// Print the replicate map and its validation report
pub fn run(args: RunArgs, json: bool, persist: bool) -> Result<()> {
    let LoadedDesign {
        layout,
        mut settings,
        pipeline,
        identifiers,
        resolution,
    } = load(&args)?;
    let report = pipeline.report(&identifiers, &resolution, layout.run_dir().display().to_string());

    if json {
        let output = json!({
            "mode": resolution.mode,
            "experiments": &resolution.replicates,
            "ambiguities": &resolution.ambiguities,
            "report": &report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Experimental Design ({:?})", resolution.mode);
        println!("===================");
        print!("{}", resolution.replicates);
        for flag in &resolution.ambiguities {
            println!(
                "  ambiguous key for {}: chose '{}' from {}",
                flag.identifier,
                flag.label,
                flag.competing.join(", ")
            );
        }
        println!();
        #[cfg(feature = "colorized_output")]
        println!("{}", report.format_colored());
        #[cfg(not(feature = "colorized_output"))]
        println!("{}", report);
    }

    if persist {
        report.into_result()?;
        layout.prepare()?;
        if resolution.mode == DesignMode::Inferred {
            settings.set_experiments(&resolution.experiment_names());
        }
        let path = settings.persist_atomic(&layout.config_dir())?;
        info!("Settings written to {}", path.display());
    }

    Ok(())
}
