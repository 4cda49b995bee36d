//! Error types for ingestion, configuration and persistence

use thiserror::Error;

/// Errors that abort an annuity run.
///
/// Per-field parse problems in lenient mode never surface here; they fall
/// back to zero or absent values inside the record layer.
#[derive(Error, Debug)]
pub enum AnnuityError {
    /// Filesystem failure while reading the source or writing the sink
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV in the source feed, rate table or summary file
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required field was absent under strict input validation
    #[error("row {row}: required field {field} is missing")]
    MissingField { row: usize, field: &'static str },

    /// A required field could not be parsed under strict input validation
    #[error("row {row}: field {field} has invalid value {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// Bad configuration value (environment, rate table, CLI)
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AnnuityError>;
