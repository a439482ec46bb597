//! # mqprep - MaxQuant Output Preparation
//!
//! `mqprep` turns the raw tab-separated output of a MaxQuant run
//! (`proteinGroups.txt` and `peptides.txt`) into a consistent experimental
//! design and a clean protein table ready for downstream statistics.
//!
//! ## Key Features
//!
//! - **Experimental Design Inference**: Sample identifiers are clustered into
//!   replicate groups by their longest common substring, or assigned to the
//!   experiment names stored in the run's settings document.
//!
//! - **Cross-Table Validation**: Both tables and the replicate map must agree
//!   on the set of sample identifiers before anything is cleaned.
//!
//! - **Protein Table Cleaning**: Contaminants and ambiguous gene names are
//!   removed, FASTA headers are decomposed and decimal-comma intensities are
//!   repaired.
//!
//! - **Reusable Settings**: An inferred design is written back atomically to
//!   `config/config.toml`, so the next run reproduces the same grouping.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mqprep::layout::{packaged_defaults_dir, AnalysisLayout};
//! use mqprep::pipeline::{run_analysis, PipelineOptions};
//! use mqprep::settings::{FsSettingsLocator, SettingsSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let layout = AnalysisLayout::new("/data/run_42", packaged_defaults_dir());
//!     let analysis = run_analysis(
//!         &layout,
//!         &SettingsSource::Locate,
//!         &FsSettingsLocator,
//!         PipelineOptions::default(),
//!         true,
//!     )?;
//!
//!     print!("{}", analysis.tables.resolution.replicates);
//!     println!("{} proteins kept", analysis.tables.proteins.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Run Directory Layout
//!
//! ```text
//! <run>/
//!   txt/proteinGroups.txt
//!   txt/peptides.txt
//!   config/config.toml
//! ```

pub mod cleaner;
pub mod design;
pub mod error;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod settings;
pub mod table;
pub mod validator;

pub use error::{PrepError, Result};
