use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;
use serde::Serialize;

use crate::error::{PrepError, Result};

/// Validation check result status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// Individual validation check result
#[derive(Debug, Clone, Serialize)]
pub struct ValidationCheck {
    /// Name of the validation check
    pub name: String,
    /// Result status of the check
    #[serde(flatten)]
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Outcome of every cross-table check for one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// List of individual validation check results
    pub checks: Vec<ValidationCheck>,
    /// Run directory or table pair that was validated
    pub subject: String,
}

impl ValidationReport {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            subject: subject.into(),
        }
    }

    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| matches!(c.status, CheckStatus::Warning(_)))
    }

    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| matches!(c.status, CheckStatus::Warning(_))).count()
    }

    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Turn failed checks into a single consistency error
    pub fn into_result(self) -> Result<()> {
        let failures: Vec<String> = self
            .checks
            .into_iter()
            .filter_map(|c| match c.status {
                CheckStatus::Failed(msg) => Some(msg),
                _ => None,
            })
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(PrepError::consistency(failures.join("; ")))
        }
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Replicate Consistency Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("============================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("Run").bold(), self.subject));

            for check in &self.checks {
                let (symbol, color_fn): (_, fn(&str) -> console::StyledObject<&str>) = match &check.status {
                    CheckStatus::Ok => (OK, |s| style(s).green()),
                    CheckStatus::Warning(_) => (WARN, |s| style(s).yellow()),
                    CheckStatus::Failed(_) => (FAIL, |s| style(s).red()),
                };

                output.push_str(&format!("[{}] {}", symbol, color_fn(&check.name)));

                match &check.status {
                    CheckStatus::Ok => output.push('\n'),
                    CheckStatus::Warning(msg) => {
                        output.push_str(&format!(" - {}: {}\n", style("WARNING").yellow().bold(), msg));
                    }
                    CheckStatus::Failed(msg) => {
                        output.push_str(&format!(" - {}: {}\n", style("FAILED").red().bold(), msg));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));

            output.push('\n');
            if self.has_failures() {
                output.push_str(&format!("{}\n", style("Replicates INCONSISTENT").red().bold()));
            } else if self.has_warnings() {
                output.push_str(&format!("{}\n", style("Replicates CONSISTENT with warnings").yellow().bold()));
            } else {
                output.push_str(&format!("{}\n", style("Replicates CONSISTENT").green().bold()));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Replicate Consistency Report")?;
        writeln!(f, "============================")?;
        writeln!(f, "Run: {}", self.subject)?;
        writeln!(f)?;

        for check in &self.checks {
            let symbol = match &check.status {
                CheckStatus::Ok => "✓",
                CheckStatus::Warning(_) => "⚠",
                CheckStatus::Failed(_) => "✗",
            };

            write!(f, "[{}] {}", symbol, check.name)?;

            match &check.status {
                CheckStatus::Ok => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;

        writeln!(f)?;
        if self.has_failures() {
            writeln!(f, "Replicates INCONSISTENT")?;
        } else if self.has_warnings() {
            writeln!(f, "Replicates CONSISTENT with warnings")?;
        } else {
            writeln!(f, "Replicates CONSISTENT")?;
        }

        Ok(())
    }
}
