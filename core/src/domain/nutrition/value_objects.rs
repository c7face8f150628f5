use crate::domain::common::entities::app_errors::CoreError;

/// Non-empty, trimmed free-text meal description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDescription(String);

impl MealDescription {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MealDescription {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Invalid(
                "meal description must not be empty".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<&str> for MealDescription {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MealDescription::try_from(value.to_string())
    }
}

/// One call to the text-generation collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instructions: String,
    pub user_message: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Structured-output hint; collaborators may ignore it.
    pub response_schema: Option<serde_json::Value>,
}
