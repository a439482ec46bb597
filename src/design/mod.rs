//! # Experimental Design Resolution
//!
//! Groups sample identifiers into experiments (replicate sets). A design is
//! either read back from the `experiments` list of the settings document or,
//! when that list is empty, inferred from the identifiers themselves.
//!
//! ## Modes
//!
//! 1. **Configured**: every identifier is assigned to the single configured
//!    experiment name it starts with.
//! 2. **Inferred**: identifiers are clustered by their longest common
//!    substrings (see [`infer_groups`]). The discovered names are meant to be
//!    written back so the next run uses configured mode.

mod configured;
mod inference;
mod replicates;


use log::{debug, info, warn};
use serde::Serialize;

use crate::error::Result;

pub use configured::assign_configured;
pub use inference::{infer_groups, longest_common_substring, AmbiguityFlag, Clustering};
pub use replicates::{ExperimentGroup, ReplicateMap};

/// How a replicate map was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignMode {
    /// Assigned from the experiment names of the settings document
    Configured,
    /// Discovered from the identifiers
    Inferred,
}

/// Result of resolving the experimental design
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub replicates: ReplicateMap,
    pub mode: DesignMode,
    /// Clustering ties; empty in configured mode
    pub ambiguities: Vec<AmbiguityFlag>,
}

impl Resolution {
    /// Experiment names to store in the settings document
    pub fn experiment_names(&self) -> Vec<String> {
        self.replicates.experiment_names()
    }
}

/// Chooses between configured and inferred experiment grouping
#[derive(Debug, Clone, Copy)]
pub struct ExperimentInferencer {
    has_replicates: bool,
}

impl Default for ExperimentInferencer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExperimentInferencer {
    /// `has_replicates = false` makes every identifier its own experiment
    /// when inferring
    pub fn new(has_replicates: bool) -> Self {
        Self { has_replicates }
    }

    /// Resolve the replicate map for `identifiers`.
    ///
    /// A non-empty `configured` list selects configured mode; otherwise the
    /// design is inferred.
    pub fn resolve(&self, configured: &[String], identifiers: &[String]) -> Result<Resolution> {
        if !configured.is_empty() {
            info!("Using saved experimental setup");
            let replicates = assign_configured(configured, identifiers)?;
            return Ok(Resolution {
                replicates,
                mode: DesignMode::Configured,
                ambiguities: Vec::new(),
            });
        }

        info!("No experiments specified in settings file. Trying to infer.");
        if !self.has_replicates {
            return Ok(Resolution {
                replicates: ReplicateMap::identity(identifiers),
                mode: DesignMode::Inferred,
                ambiguities: Vec::new(),
            });
        }

        let Clustering {
            replicates,
            ambiguities,
        } = infer_groups(identifiers);

        for flag in &ambiguities {
            warn!(
                "unclear match for replicate '{}': chose '{}' among {}",
                flag.identifier,
                flag.label,
                flag.competing.join(", ")
            );
        }
        info!("determined experiments: {}", replicates.experiment_names().join(", "));
        debug!("number of replicates per experiment:");
        for group in replicates.groups() {
            debug!("{}: {}", group.name, group.replicates.len());
        }

        Ok(Resolution {
            replicates,
            mode: DesignMode::Inferred,
            ambiguities,
        })
    }
}
