//! Two-phase orchestration of a preparation run.
//!
//! [`Pipeline`] is the pure core: it works on tables and settings that are
//! already in memory. [`run_analysis`] wraps it with the explicit file system
//! steps of a run (directory setup, settings lookup, table loading, settings
//! write-back, name list materialization).

use std::path::PathBuf;

use log::info;

use crate::cleaner::{CleanedProteinTable, CleanerConfig, ProteinTableCleaner};
use crate::design::{DesignMode, ExperimentInferencer, Resolution};
use crate::error::Result;
use crate::layout::AnalysisLayout;
use crate::settings::{
    materialize_name_lists, resolve_settings, NameListPaths, Settings, SettingsLocator,
    SettingsSource,
};
use crate::table::{ColumnCatalog, RawTable};
use crate::validator::{CrossTableValidator, ValidationReport};

/// Knobs of a preparation run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Whether samples come in replicate sets; `false` makes every sample
    /// its own experiment when inferring
    pub has_replicates: bool,
    pub catalog: ColumnCatalog,
    pub cleaner: CleanerConfig,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            has_replicates: true,
            catalog: ColumnCatalog::default(),
            cleaner: CleanerConfig::default(),
        }
    }
}

/// Sample identifiers of both tables, longest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleIdentifiers {
    pub proteins: Vec<String>,
    pub peptides: Vec<String>,
}

/// Everything the core hands to downstream analysis
#[derive(Debug, Clone)]
pub struct PreparedTables {
    pub resolution: Resolution,
    pub proteins: CleanedProteinTable,
    pub identifiers: SampleIdentifiers,
}

/// Pure preparation core
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Extract the identifiers of both tables
    pub fn identifiers(&self, proteins: &RawTable, peptides: &RawTable) -> Result<SampleIdentifiers> {
        Ok(SampleIdentifiers {
            proteins: self.options.catalog.identifiers(proteins)?,
            peptides: self.options.catalog.identifiers(peptides)?,
        })
    }

    /// Resolve the replicate map once, from `settings` or by inference
    pub fn infer_or_load(&self, settings: &Settings, identifiers: &SampleIdentifiers) -> Result<Resolution> {
        let configured = settings.experiments()?;
        ExperimentInferencer::new(self.options.has_replicates).resolve(&configured, &identifiers.proteins)
    }

    /// Full cross-table report for a resolved design
    pub fn report(
        &self,
        identifiers: &SampleIdentifiers,
        resolution: &Resolution,
        subject: impl Into<String>,
    ) -> ValidationReport {
        CrossTableValidator::new(
            &identifiers.proteins,
            &identifiers.peptides,
            &resolution.replicates,
        )
        .report(subject)
    }

    /// Fail unless both tables agree with the resolved design
    pub fn validate(&self, identifiers: &SampleIdentifiers, resolution: &Resolution) -> Result<()> {
        CrossTableValidator::new(
            &identifiers.proteins,
            &identifiers.peptides,
            &resolution.replicates,
        )
        .validate()
    }

    pub fn clean(&self, proteins: &RawTable) -> Result<CleanedProteinTable> {
        ProteinTableCleaner::new(self.options.cleaner.clone()).clean(proteins)
    }

    /// Resolve, validate and clean.
    ///
    /// An inferred design is recorded in `settings` so the caller can
    /// persist it.
    pub fn prepare(
        &self,
        settings: &mut Settings,
        proteins: &RawTable,
        peptides: &RawTable,
    ) -> Result<PreparedTables> {
        let identifiers = self.identifiers(proteins, peptides)?;
        let resolution = self.infer_or_load(settings, &identifiers)?;
        self.validate(&identifiers, &resolution)?;
        let cleaned = self.clean(proteins)?;

        if resolution.mode == DesignMode::Inferred {
            settings.set_experiments(&resolution.experiment_names());
        }

        Ok(PreparedTables {
            resolution,
            proteins: cleaned,
            identifiers,
        })
    }
}

/// Result of a complete run over an analysis directory
#[derive(Debug)]
pub struct PreparedAnalysis {
    pub tables: PreparedTables,
    pub peptides: RawTable,
    pub settings: Settings,
    /// Settings document the run was configured from
    pub settings_source: PathBuf,
    /// Settings document written back, if any
    pub settings_written: Option<PathBuf>,
    pub name_lists: NameListPaths,
}

/// Run every step over the analysis directory described by `layout`.
///
/// The settings document is written back to the run's `config` directory
/// when `persist` is set, and only after validation and cleaning succeeded.
pub fn run_analysis(
    layout: &AnalysisLayout,
    source: &SettingsSource,
    locator: &dyn SettingsLocator,
    options: PipelineOptions,
    persist: bool,
) -> Result<PreparedAnalysis> {
    layout.prepare()?;
    let (mut settings, settings_source) = resolve_settings(source, layout, locator)?;
    let (proteins, peptides) = layout.load_tables()?;

    let tables = Pipeline::new(options).prepare(&mut settings, &proteins, &peptides)?;

    let settings_written = if persist {
        Some(settings.persist_atomic(&layout.config_dir())?)
    } else {
        None
    };

    info!("Reading proteins and receptors of interest");
    let name_lists = materialize_name_lists(layout)?;

    Ok(PreparedAnalysis {
        tables,
        peptides,
        settings,
        settings_source,
        settings_written,
        name_lists,
    })
}
