//! Error types for the health assessment core

use thiserror::Error;

/// Errors raised by the assessment core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    #[error("Profile is missing or incomplete")]
    MissingProfile,

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Score {score} is not an option for question {question}")]
    ScoreOutOfDomain { question: String, score: u32 },

    #[error("Catalog integrity error: {0}")]
    CatalogIntegrity(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AssessmentError {
    /// Shorthand for an [`AssessmentError::InvalidInput`]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingProfile => "MISSING_PROFILE",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::UnknownQuestion(_) => "UNKNOWN_QUESTION",
            Self::ScoreOutOfDomain { .. } => "SCORE_OUT_OF_DOMAIN",
            Self::CatalogIntegrity(_) => "CATALOG_INTEGRITY",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Message shown on the profile-entry view after a failure
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingProfile => {
                "Please fill in your information to continue".to_string()
            }
            Self::InvalidInput { field, message } => format!(
                "{}: {}",
                crate::validation::get_field_display_label(field),
                message
            ),
            other => other.to_string(),
        }
    }
}

/// Result alias for the assessment core
pub type AssessmentResult<T> = Result<T, AssessmentError>;
