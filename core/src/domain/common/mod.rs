use std::time::Duration;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct MealScribeConfig {
    pub llm: LLMConfig,
    pub transcription: TranscriptionConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TranscriptionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

/// Knobs for the extraction pipeline.
///
/// Temperatures and token limits are passed through to the text-generation
/// collaborator. `extraction_timeout` bounds the primary call and is a hard
/// failure; `insight_timeout` bounds each per-item call and only empties that
/// item's insights.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub extraction_temperature: f32,
    pub extraction_max_tokens: u32,
    pub extraction_timeout: Duration,
    pub insight_temperature: f32,
    pub insight_max_tokens: u32,
    pub insight_timeout: Duration,
    pub insight_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extraction_temperature: 0.1,
            extraction_max_tokens: 1024,
            extraction_timeout: Duration::from_secs(30),
            insight_temperature: 0.3,
            insight_max_tokens: 400,
            insight_timeout: Duration::from_secs(15),
            insight_concurrency: 8,
        }
    }
}
