use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, info};

use crate::error::{PrepError, Result};
use crate::layout::AnalysisLayout;

use super::Settings;

/// Where a settings document was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// The run's own `config/config.toml`
    FoundInRunDir(PathBuf),
    /// The packaged default settings document
    FoundInDefaults(PathBuf),
    NotFound,
}

/// Capability to find a settings document for a run
pub trait SettingsLocator {
    fn locate(&self, layout: &AnalysisLayout) -> LocateOutcome;
}

/// Looks in the run directory first, then in the defaults directory
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSettingsLocator;

impl SettingsLocator for FsSettingsLocator {
    fn locate(&self, layout: &AnalysisLayout) -> LocateOutcome {
        let run_settings = layout.settings_path();
        if run_settings.is_file() {
            debug!("Found settings file in config dir");
            return LocateOutcome::FoundInRunDir(run_settings);
        }
        let defaults = layout.default_settings_path();
        if defaults.is_file() {
            debug!("Loading default settings file from {}", defaults.display());
            return LocateOutcome::FoundInDefaults(defaults);
        }
        LocateOutcome::NotFound
    }
}

/// Which settings document a run should use
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettingsSource {
    /// Ask a [`SettingsLocator`]
    #[default]
    Locate,
    /// The packaged default document
    Default,
    /// The run's own `config/config.toml`
    RunDir,
    /// An explicit file
    Path(PathBuf),
}

impl FromStr for SettingsSource {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "default" => SettingsSource::Default,
            "file" => SettingsSource::RunDir,
            _ => SettingsSource::Path(PathBuf::from(s)),
        })
    }
}

/// Load the settings document selected by `source`
pub fn resolve_settings(
    source: &SettingsSource,
    layout: &AnalysisLayout,
    locator: &dyn SettingsLocator,
) -> Result<(Settings, PathBuf)> {
    let path = match source {
        SettingsSource::Default => layout.default_settings_path(),
        SettingsSource::RunDir => layout.settings_path(),
        SettingsSource::Path(path) => path.clone(),
        SettingsSource::Locate => match locator.locate(layout) {
            LocateOutcome::FoundInRunDir(path) | LocateOutcome::FoundInDefaults(path) => path,
            LocateOutcome::NotFound => {
                return Err(PrepError::MissingFile(layout.default_settings_path()))
            }
        },
    };
    info!("loading settings file {}", path.display());
    let settings = Settings::from_file(&path)?;
    Ok((settings, path))
}
