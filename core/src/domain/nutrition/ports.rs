use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::{
        entities::NutritionLog,
        value_objects::{GenerationRequest, MealDescription},
    },
    transcription::value_objects::TranscribeAudioInput,
};

/// Text-generation collaborator. Returns free text that is expected, but not
/// trusted, to be JSON.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync + 'static {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for turning meal descriptions into nutrition logs
#[cfg_attr(test, mockall::automock)]
pub trait NutritionService: Send + Sync {
    fn extract(
        &self,
        description: MealDescription,
    ) -> impl Future<Output = Result<NutritionLog, CoreError>> + Send;

    fn extract_from_audio(
        &self,
        input: TranscribeAudioInput,
    ) -> impl Future<Output = Result<NutritionLog, CoreError>> + Send;
}
