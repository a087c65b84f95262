//! Application error handling
//!
//! Assessment failures are usually shown to the user and recovered from
//! by the views. Only failures the views cannot recover from reach this type.

use health_assessment_shared::AssessmentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Assessment(_) => 1,
            CliError::Io(_) => 74,
            CliError::Config(_) => 78,
        }
    }
}

/// Result type alias for the CLI
pub type CliResult<T> = Result<T, CliError>;
