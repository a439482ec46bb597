//! Directory conventions of a MaxQuant analysis run.
//!
//! ```text
//! <run>/
//!   txt/proteinGroups.txt
//!   txt/peptides.txt
//!   config/config.toml
//!   config/<name lists>.tsv
//! ```
//!
//! Packaged defaults (`ms_analysis_default.toml` and the default name lists)
//! live in a separate defaults directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{PrepError, Result};
use crate::table::{RawTable, TableKind};

/// Settings document name inside a run's `config` directory
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Settings document name inside the defaults directory
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "ms_analysis_default.toml";

/// Defaults shipped alongside the crate sources
pub fn packaged_defaults_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

/// Paths of one analysis run and of the defaults it falls back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisLayout {
    run_dir: PathBuf,
    defaults_dir: PathBuf,
}

impl AnalysisLayout {
    /// Layout rooted at `start_dir`.
    ///
    /// A path pointing into the `txt` directory (such as
    /// `<run>/txt/proteinGroups.txt`) is normalized to `<run>`.
    pub fn new(start_dir: impl AsRef<Path>, defaults_dir: impl Into<PathBuf>) -> Self {
        let start_dir = start_dir.as_ref();
        let run_dir = match start_dir.parent() {
            Some(parent) if parent.file_name().is_some_and(|n| n == "txt") => {
                debug!("Removing txt ending from path");
                parent.parent().unwrap_or(parent).to_path_buf()
            }
            _ => start_dir.to_path_buf(),
        };
        info!("Starting dir: {}", run_dir.display());
        Self {
            run_dir,
            defaults_dir: defaults_dir.into(),
        }
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn defaults_dir(&self) -> &Path {
        &self.defaults_dir
    }

    pub fn txt_dir(&self) -> PathBuf {
        self.run_dir.join("txt")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.run_dir.join("config")
    }

    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.txt_dir().join(kind.file_name())
    }

    /// The run's own settings document
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir().join(SETTINGS_FILE_NAME)
    }

    /// The packaged default settings document
    pub fn default_settings_path(&self) -> PathBuf {
        self.defaults_dir.join(DEFAULT_SETTINGS_FILE_NAME)
    }

    /// Create the run's `config` directory
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(self.config_dir())?;
        Ok(())
    }

    /// Read `proteinGroups.txt` and `peptides.txt`
    pub fn load_tables(&self) -> Result<(RawTable, RawTable)> {
        let txt_dir = self.txt_dir();
        if !txt_dir.is_dir() {
            return Err(PrepError::MissingFile(txt_dir));
        }
        info!(
            "Reading {}, and {}",
            TableKind::Proteins,
            TableKind::Peptides
        );
        let proteins = RawTable::from_tsv_file(self.table_path(TableKind::Proteins), TableKind::Proteins)?;
        let peptides = RawTable::from_tsv_file(self.table_path(TableKind::Peptides), TableKind::Peptides)?;
        Ok((proteins, peptides))
    }
}
