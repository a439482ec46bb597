use std::collections::HashSet;

use log::debug;

use crate::error::{PrepError, Result};

use super::ReplicateMap;

/// Assign identifiers to configured experiment names by literal prefix.
///
/// Each identifier must start with exactly one configured name. Groups are
/// ordered as configured; names that match no identifier are left out.
pub fn assign_configured(experiments: &[String], identifiers: &[String]) -> Result<ReplicateMap> {
    let mut seen = HashSet::new();
    for experiment in experiments {
        if experiment.is_empty() {
            return Err(PrepError::config(
                "experiments list contains an empty experiment name",
            ));
        }
        if !seen.insert(experiment.as_str()) {
            return Err(PrepError::config(format!(
                "experiment '{experiment}' is listed more than once"
            )));
        }
    }

    let mut assignment: Vec<(&str, &str)> = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        let matches: Vec<&str> = experiments
            .iter()
            .filter(|e| identifier.starts_with(e.as_str()))
            .map(String::as_str)
            .collect();
        match matches.as_slice() {
            [] => {
                return Err(PrepError::consistency(format!(
                    "replicate '{identifier}' does not start with any configured experiment name"
                )))
            }
            [experiment] => assignment.push((*experiment, identifier.as_str())),
            _ => {
                return Err(PrepError::consistency(format!(
                    "replicate '{identifier}' matches several configured experiments: {}",
                    matches.join(", ")
                )))
            }
        }
    }

    let mut replicates = ReplicateMap::new();
    for experiment in experiments {
        let mut members = assignment.iter().filter(|(e, _)| *e == experiment.as_str()).peekable();
        if members.peek().is_none() {
            debug!("configured experiment '{experiment}' has no replicates");
            continue;
        }
        for (_, identifier) in members {
            replicates.push_replicate(experiment, identifier);
        }
    }
    Ok(replicates)
}
