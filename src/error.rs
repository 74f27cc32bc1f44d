//! Error handling for the resume recommender

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input text is too short or empty to analyze ({length} characters, minimum {minimum})")]
    InputTooShort { length: usize, minimum: usize },

    #[error("No skills were detected in the resume")]
    NoSkillsDetected,

    #[error("Skill catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Job catalog error: {0}")]
    Csv(#[from] csv::Error),
}

impl RecommenderError {
    /// True when the failure describes the resume content rather than the
    /// system, so the end user should fix the input instead of retrying.
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            RecommenderError::InputTooShort { .. }
                | RecommenderError::NoSkillsDetected
                | RecommenderError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RecommenderError>;
