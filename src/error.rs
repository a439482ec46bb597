//! Error taxonomy shared by every stage of the preparation pipeline.
//!
//! All variants terminate a run. Warning-level findings (ambiguous clusters,
//! duplicate gene removals) are logged instead and never surface here.

use std::path::PathBuf;

/// Errors that can occur while preparing a MaxQuant result directory
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// Settings document is missing a value, malformed, or ambiguous
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required input table or default asset could not be found
    #[error("Missing file: {}", .0.display())]
    MissingFile(PathBuf),

    /// Sample identifiers disagree between tables or the replicate map
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// A cell or header could not be interpreted
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// I/O error reading or writing a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

impl PrepError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        PrepError::Config(msg.into())
    }

    pub(crate) fn consistency(msg: impl Into<String>) -> Self {
        PrepError::Consistency(msg.into())
    }

    pub(crate) fn data_format(msg: impl Into<String>) -> Self {
        PrepError::DataFormat(msg.into())
    }
}

impl From<toml::de::Error> for PrepError {
    fn from(err: toml::de::Error) -> Self {
        PrepError::Config(format!("failed to parse settings document: {err}"))
    }
}

impl From<toml::ser::Error> for PrepError {
    fn from(err: toml::ser::Error) -> Self {
        PrepError::Config(format!("failed to serialize settings document: {err}"))
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, PrepError>;
