use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{PrepError, Result};

/// A named set of sample identifiers considered biological repeats
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentGroup {
    /// Experiment name, also the configured prefix of its members
    pub name: String,
    /// Member identifiers in discovery order
    pub replicates: Vec<String>,
}

/// Discovery-ordered mapping of experiment name to replicate identifiers.
///
/// Names are unique. Groups are disjoint once the map has passed
/// [`ReplicateMap::check_partition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReplicateMap {
    groups: Vec<ExperimentGroup>,
}

impl ReplicateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `identifier` to the group `name`, creating the group at the end
    pub(crate) fn push_replicate(&mut self, name: &str, identifier: &str) {
        match self.groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.replicates.push(identifier.to_string()),
            None => self.groups.push(ExperimentGroup {
                name: name.to_string(),
                replicates: vec![identifier.to_string()],
            }),
        }
    }

    /// Every identifier becomes a single-member group of its own name
    pub fn identity<S: AsRef<str>>(identifiers: &[S]) -> Self {
        let mut map = Self::new();
        for id in identifiers {
            map.push_replicate(id.as_ref(), id.as_ref());
        }
        map
    }

    pub fn groups(&self) -> &[ExperimentGroup] {
        &self.groups
    }

    /// Experiment names in discovery order
    pub fn experiment_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    /// Replicates of experiment `name`
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.replicates.as_slice())
    }

    /// Experiment containing `identifier`
    pub fn experiment_of(&self, identifier: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.replicates.iter().any(|r| r == identifier))
            .map(|g| g.name.as_str())
    }

    /// All member identifiers, group by group
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.replicates.iter().map(String::as_str))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers().any(|r| r == identifier)
    }

    /// Number of experiments
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Verify that no identifier belongs to more than one group
    pub fn check_partition(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let repeated: Vec<&str> = self
            .identifiers()
            .filter(|id| !seen.insert(*id))
            .collect();
        if repeated.is_empty() {
            Ok(())
        } else {
            Err(PrepError::consistency(format!(
                "replicates assigned to more than one experiment: {}",
                repeated.join(", ")
            )))
        }
    }
}

impl fmt::Display for ReplicateMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(
                f,
                "{} ({}): {}",
                group.name,
                group.replicates.len(),
                group.replicates.join(", ")
            )?;
        }
        Ok(())
    }
}
