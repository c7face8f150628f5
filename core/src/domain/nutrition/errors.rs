use thiserror::Error;

/// Why an extraction was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionCause {
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("invalid structure: {0}")]
    InvalidStructure(ValidationError),

    #[error("collaborator unreachable: {0}")]
    CollaboratorUnreachable(String),
}

impl ExtractionCause {
    pub fn as_str(&self) -> &str {
        match self {
            ExtractionCause::MalformedJson(_) => "malformed_json",
            ExtractionCause::InvalidStructure(_) => "invalid_structure",
            ExtractionCause::CollaboratorUnreachable(_) => "collaborator_unreachable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("response is not an object")]
    NotAnObject,

    #[error("missing meal string")]
    MissingMeal,

    #[error("missing items array")]
    MissingItems,

    #[error("malformed item at index {index}: {reason}")]
    MalformedItem { index: usize, reason: String },

    #[error("calorie total is not a finite number")]
    NonFiniteTotal,
}

impl From<ValidationError> for ExtractionCause {
    fn from(error: ValidationError) -> Self {
        ExtractionCause::InvalidStructure(error)
    }
}
