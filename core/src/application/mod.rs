use crate::{
    domain::common::{MealScribeConfig, services::Service},
    infrastructure::{llm::GeminiLLMClient, speech::WhisperClient},
};

pub type MealScribeService = Service<GeminiLLMClient, WhisperClient>;

/// Wires the production adapters into the domain service.
pub fn create_service(config: MealScribeConfig) -> Result<MealScribeService, anyhow::Error> {
    let llm_client = GeminiLLMClient::new(&config.llm)?;
    let speech_client = WhisperClient::new(&config.transcription)?;

    tracing::info!(
        model = %config.llm.gemini_model,
        transcription_model = %config.transcription.model,
        insight_concurrency = config.pipeline.insight_concurrency,
        "service created"
    );

    Ok(Service::new(llm_client, speech_client, config.pipeline))
}
