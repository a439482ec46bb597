//! # Settings Document
//!
//! The per-run TOML settings document. Only the `experiments` key is
//! interpreted here; every other key belongs to downstream analysis and is
//! carried through unchanged when the document is rewritten.
//!
//! ```toml
//! experiments = ["Control_", "Treated_"]
//!
//! [plots]
//! volcano = true
//! ```

mod assets;
mod locate;

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;
use toml::{Table, Value};

use crate::error::{PrepError, Result};
use crate::layout::SETTINGS_FILE_NAME;

pub use assets::{materialize_name_lists, NameListPaths, NAME_LIST_FILES};
pub use locate::{resolve_settings, FsSettingsLocator, LocateOutcome, SettingsLocator, SettingsSource};

const EXPERIMENTS_KEY: &str = "experiments";

/// Parsed settings document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    document: Table,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PrepError::MissingFile(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_str(&content)?;
        debug!("Config file contents: {:?}", settings.document);
        Ok(settings)
    }

    /// Parse settings from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let document: Table = toml::from_str(content)?;
        Ok(Self { document })
    }

    /// Render the document as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&self.document)?)
    }

    /// Configured experiment names; empty when the key is absent.
    ///
    /// Fails if the value is not an array of strings or contains an empty
    /// name.
    pub fn experiments(&self) -> Result<Vec<String>> {
        let Some(value) = self.document.get(EXPERIMENTS_KEY) else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            return Err(PrepError::config("'experiments' must be an array of names"));
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(name) if !name.is_empty() => Ok(name.clone()),
                Value::String(_) => Err(PrepError::config(
                    "Missing experiment name in 'experiments' of settings file",
                )),
                other => Err(PrepError::config(format!(
                    "experiment names must be strings, found {other}"
                ))),
            })
            .collect()
    }

    /// Replace the experiment list
    pub fn set_experiments(&mut self, experiments: &[String]) {
        let items = experiments.iter().cloned().map(Value::String).collect();
        self.document
            .insert(EXPERIMENTS_KEY.to_string(), Value::Array(items));
    }

    /// Value of any other top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Write `config.toml` into `config_dir` without ever exposing a
    /// partially written file.
    ///
    /// The document goes to a temporary file in the same directory which is
    /// then renamed over the canonical one.
    pub fn persist_atomic(&self, config_dir: &Path) -> Result<PathBuf> {
        debug!("Updating settings file in {}", config_dir.display());
        let target = config_dir.join(SETTINGS_FILE_NAME);
        let content = self.to_toml_string()?;

        let mut temp_file = NamedTempFile::new_in(config_dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(&target)
            .map_err(|e| PrepError::Io(e.error))?;
        Ok(target)
    }
}
