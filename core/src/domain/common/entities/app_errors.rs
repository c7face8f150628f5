use thiserror::Error;

use crate::domain::nutrition::errors::ExtractionCause;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("could not understand audio: {0}")]
    TranscriptionFailure(String),

    #[error("could not parse food description: {0}")]
    ExtractionFailure(ExtractionCause),

    #[error("external service error: {0}")]
    ExternalServiceError(String),

    #[error("invalid input: {0}")]
    Invalid(String),
}

impl From<ExtractionCause> for CoreError {
    fn from(cause: ExtractionCause) -> Self {
        CoreError::ExtractionFailure(cause)
    }
}
