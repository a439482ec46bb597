//! # Cross-Table Validation
//!
//! Checks that `proteinGroups.txt`, `peptides.txt` and the resolved
//! replicate map agree on the set of sample identifiers. Validation never
//! mutates anything; a failed report aborts the run.
//!
//! ## Validation Checklist
//!
//! 1. **Table agreement**: every peptide-table identifier occurs in the
//!    protein table
//! 2. **Coverage**: every identifier of either table belongs to an experiment
//! 3. **Disjointness**: no identifier belongs to two experiments
//! 4. **Unused replicates** (warning only): map members found in neither table

mod report;

use std::collections::HashSet;

use crate::design::ReplicateMap;
use crate::error::Result;
use crate::table::TableKind;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

/// Identifier-set consistency checks between both tables and the design
#[derive(Debug, Clone, Copy)]
pub struct CrossTableValidator<'a> {
    protein_ids: &'a [String],
    peptide_ids: &'a [String],
    replicates: &'a ReplicateMap,
}

impl<'a> CrossTableValidator<'a> {
    pub fn new(
        protein_ids: &'a [String],
        peptide_ids: &'a [String],
        replicates: &'a ReplicateMap,
    ) -> Self {
        Self {
            protein_ids,
            peptide_ids,
            replicates,
        }
    }

    /// Run every check and collect the outcome
    pub fn report(&self, subject: impl Into<String>) -> ValidationReport {
        let mut report = ValidationReport::new(subject);

        let proteins: HashSet<&str> = self.protein_ids.iter().map(String::as_str).collect();
        let missing_in_proteins: Vec<&str> = self
            .peptide_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !proteins.contains(id))
            .collect();
        report.add_check(presence_check(
            format!(
                "{} replicates present in {}",
                TableKind::Peptides,
                TableKind::Proteins
            ),
            &missing_in_proteins,
            format!(
                "Found replicates in {}, but not in {}",
                TableKind::Peptides,
                TableKind::Proteins
            ),
        ));

        for (kind, ids) in [
            (TableKind::Proteins, self.protein_ids),
            (TableKind::Peptides, self.peptide_ids),
        ] {
            let unassigned: Vec<&str> = ids
                .iter()
                .map(String::as_str)
                .filter(|id| !self.replicates.contains(id))
                .collect();
            report.add_check(presence_check(
                format!("{kind} replicates assigned to experiments"),
                &unassigned,
                format!("Found replicates in {kind} that belong to no experiment"),
            ));
        }

        report.add_check(match self.replicates.check_partition() {
            Ok(()) => ValidationCheck::ok("Experiments are disjoint"),
            Err(e) => ValidationCheck::failed("Experiments are disjoint", e.to_string()),
        });

        let peptides: HashSet<&str> = self.peptide_ids.iter().map(String::as_str).collect();
        let unused: Vec<&str> = self
            .replicates
            .identifiers()
            .filter(|id| !proteins.contains(id) && !peptides.contains(id))
            .collect();
        report.add_check(if unused.is_empty() {
            ValidationCheck::ok("All experiment members observed")
        } else {
            ValidationCheck::warning(
                "All experiment members observed",
                format!("not found in either table: {}", unused.join(", ")),
            )
        });

        report
    }

    /// Fail with a consistency error naming the unmatched identifiers
    pub fn validate(&self) -> Result<()> {
        self.report("replicate map").into_result()
    }
}

fn presence_check(name: String, unmatched: &[&str], message: String) -> ValidationCheck {
    if unmatched.is_empty() {
        ValidationCheck::ok(name)
    } else {
        ValidationCheck::failed(name, format!("{message}: {}", unmatched.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::infer_groups;
    use crate::error::PrepError;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_peptide_only_identifier_fails() {
        let proteins = ids(&["A_1", "A_2"]);
        let peptides = ids(&["A_1", "A_2", "B_1"]);
        let map = infer_groups(&proteins).replicates;

        let err = CrossTableValidator::new(&proteins, &peptides, &map)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PrepError::Consistency(_)));
        assert!(err.to_string().contains("B_1"));
    }

    #[test]
    fn test_unassigned_identifier_fails() {
        let proteins = ids(&["A_1", "A_2", "C"]);
        let peptides = ids(&["A_1"]);
        let map = infer_groups(&ids(&["A_1", "A_2"])).replicates;

        let report = CrossTableValidator::new(&proteins, &peptides, &map).report("run");
        assert!(report.has_failures());
        assert_eq!(report.failure_count(), 1);
        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("C"));
    }

    #[test]
    fn test_consistent_tables_pass() {
        let proteins = ids(&["WT_1", "WT_2", "KO_1", "KO_2"]);
        let peptides = ids(&["WT_1", "KO_2"]);
        let map = infer_groups(&proteins).replicates;

        let report = CrossTableValidator::new(&proteins, &peptides, &map).report("run");
        assert!(!report.has_failures());
        assert!(!report.has_warnings());
        assert_eq!(report.success_count(), 5);
        assert!(CrossTableValidator::new(&proteins, &peptides, &map).validate().is_ok());
    }

    #[test]
    fn test_unused_member_is_warning_only() {
        let proteins = ids(&["WT_1"]);
        let map = infer_groups(&ids(&["WT_1", "WT_2"])).replicates;

        let validator = CrossTableValidator::new(&proteins, &proteins, &map);
        let report = validator.report("run");
        assert!(report.has_warnings());
        assert!(!report.has_failures());
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_report_display() {
        let mut report = ValidationReport::new("run");
        report.add_check(ValidationCheck::ok("Test check 1"));
        report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
        report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

        let output = format!("{}", report);
        assert!(output.contains("✓"));
        assert!(output.contains("⚠"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.contains("Replicates INCONSISTENT"));
    }

    #[test]
    fn test_report_json() {
        let mut report = ValidationReport::new("run");
        report.add_check(ValidationCheck::ok("a"));
        report.add_check(ValidationCheck::failed("b", "boom"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["checks"][0]["status"], "ok");
        assert_eq!(json["checks"][1]["status"], "failed");
        assert_eq!(json["checks"][1]["message"], "boom");
    }
}
