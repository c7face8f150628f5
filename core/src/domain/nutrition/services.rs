use tracing::{error, info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    nutrition::{
        entities::NutritionLog,
        errors::ExtractionCause,
        helpers::parse_extraction_response,
        ports::{LLMClient, NutritionService},
        prompts::extraction_instructions,
        schema::nutrition_log_schema,
        value_objects::{GenerationRequest, MealDescription},
    },
    transcription::{
        ports::{SpeechToTextClient, TranscriptionService},
        value_objects::TranscribeAudioInput,
    },
};

impl<LLM, STT> NutritionService for Service<LLM, STT>
where
    LLM: LLMClient,
    STT: SpeechToTextClient,
{
    #[instrument(skip(self, description), fields(chars = description.as_str().len()))]
    async fn extract(&self, description: MealDescription) -> Result<NutritionLog, CoreError> {
        // 1. Build the constrained request
        let request = GenerationRequest {
            system_instructions: extraction_instructions(),
            user_message: description.into_inner(),
            temperature: self.config.extraction_temperature,
            max_output_tokens: self.config.extraction_max_tokens,
            response_schema: Some(nutrition_log_schema()),
        };

        // 2. Call the collaborator; a failure or timeout here fails the request
        let raw_response = tokio::time::timeout(
            self.config.extraction_timeout,
            self.llm_client.generate(request),
        )
        .await
        .map_err(|_| {
            ExtractionCause::CollaboratorUnreachable(format!(
                "extraction timed out after {:?}",
                self.config.extraction_timeout
            ))
        })
        .and_then(|response| {
            response.map_err(|e| ExtractionCause::CollaboratorUnreachable(e.to_string()))
        })
        .and_then(|raw| {
            if raw.trim().is_empty() {
                Err(ExtractionCause::CollaboratorUnreachable(
                    "empty response".to_string(),
                ))
            } else {
                Ok(raw)
            }
        })
        .inspect_err(|cause| {
            error!(cause = cause.as_str(), error = %cause, "extraction call failed")
        })?;

        // 3-4. Sanitize, parse and validate
        let validated = parse_extraction_response(&raw_response)
            .inspect_err(|cause| warn!(cause = cause.as_str(), "extraction rejected"))?;

        // 5-6. Insights keep order and length; the total is recomputed
        let items = self.insight_generator.annotate(validated.items).await;
        let log = NutritionLog::new(validated.meal, items);

        info!(
            meal = log.meal(),
            item_count = log.items().len(),
            total_calories = log.total_estimated_calories(),
            "nutrition log extracted"
        );

        Ok(log)
    }

    #[instrument(skip(self, input), fields(filename = %input.filename))]
    async fn extract_from_audio(
        &self,
        input: TranscribeAudioInput,
    ) -> Result<NutritionLog, CoreError> {
        let transcription = self.transcribe_audio(input).await?;

        let description = MealDescription::try_from(transcription.text).map_err(|_| {
            CoreError::TranscriptionFailure("no speech recognised".to_string())
        })?;

        self.extract(description).await
    }
}
