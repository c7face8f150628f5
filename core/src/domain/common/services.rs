use std::sync::Arc;

use crate::domain::{
    common::PipelineConfig,
    nutrition::{insights::InsightGenerator, ports::LLMClient},
    transcription::ports::SpeechToTextClient,
};

/// Holds the collaborator adapters and implements every domain service trait.
pub struct Service<LLM, STT>
where
    LLM: LLMClient,
    STT: SpeechToTextClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) speech_client: Arc<STT>,
    pub(crate) insight_generator: InsightGenerator<LLM>,
    pub(crate) config: PipelineConfig,
}

impl<LLM, STT> Service<LLM, STT>
where
    LLM: LLMClient,
    STT: SpeechToTextClient,
{
    pub fn new(llm_client: LLM, speech_client: STT, config: PipelineConfig) -> Self {
        let llm_client = Arc::new(llm_client);
        let insight_generator = InsightGenerator::new(llm_client.clone(), &config);

        Self {
            llm_client,
            speech_client: Arc::new(speech_client),
            insight_generator,
            config,
        }
    }
}

impl<LLM, STT> Clone for Service<LLM, STT>
where
    LLM: LLMClient,
    STT: SpeechToTextClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: self.llm_client.clone(),
            speech_client: self.speech_client.clone(),
            insight_generator: self.insight_generator.clone(),
            config: self.config.clone(),
        }
    }
}
