/// Error types for the catch log core library
use crate::validate::RuleViolation;
use thiserror::Error;

/// Main error type for catch log operations
#[derive(Error, Debug)]
pub enum FclError {
    /// Incoming data is missing canonical columns
    #[error("Incoming data is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Row count after a replace did not match what was written
    #[error("Replace verification failed: wrote {written} rows, re-read {reread}")]
    ReplaceVerification { written: usize, reread: usize },

    /// Candidate record failed validation
    #[error("Record failed validation: {}", .violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; "))]
    Validation { violations: Vec<RuleViolation> },

    /// Supplied clear secret did not match the expected secret
    #[error("Clear secret mismatch; master file left untouched")]
    SecretMismatch,

    /// Failed to write the master file
    #[error("Failed to persist master file: {0}")]
    Persistence(#[from] std::io::Error),

    /// Failed to parse or serialize CSV
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}

/// Type alias for Results using FclError
pub type Result<T> = std::result::Result<T, FclError>;
