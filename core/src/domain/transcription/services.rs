use tracing::{info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    nutrition::ports::LLMClient,
    transcription::{
        entities::TranscriptionResult,
        ports::{SpeechToTextClient, TranscriptionService},
        value_objects::TranscribeAudioInput,
    },
};

impl<LLM, STT> TranscriptionService for Service<LLM, STT>
where
    LLM: LLMClient,
    STT: SpeechToTextClient,
{
    #[instrument(skip(self, input), fields(filename = %input.filename, bytes = input.audio.len()))]
    async fn transcribe_audio(
        &self,
        input: TranscribeAudioInput,
    ) -> Result<TranscriptionResult, CoreError> {
        if input.audio.is_empty() {
            return Err(CoreError::Invalid("audio buffer is empty".to_string()));
        }

        let result = self
            .speech_client
            .transcribe(input.audio, input.filename)
            .await
            .map_err(|e| {
                warn!(error = %e, "transcription failed");
                match e {
                    CoreError::TranscriptionFailure(message) => {
                        CoreError::TranscriptionFailure(message)
                    }
                    other => CoreError::TranscriptionFailure(other.to_string()),
                }
            })?;

        info!(
            chars = result.text.len(),
            language = result.language.as_deref().unwrap_or("unknown"),
            "audio transcribed"
        );

        Ok(result)
    }
}
