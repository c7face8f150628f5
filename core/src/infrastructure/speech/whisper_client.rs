use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;

use crate::domain::{
    common::{TranscriptionConfig, entities::app_errors::CoreError},
    transcription::{entities::TranscriptionResult, ports::SpeechToTextClient},
};

/// OpenAI-compatible `/audio/transcriptions` client (Groq, OpenAI).
///
/// Audio is forwarded untouched; the filename tells the provider which
/// container format to expect.
#[derive(Debug, Clone)]
pub struct WhisperClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl WhisperClient {
    pub fn new(config: &TranscriptionConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                CoreError::TranscriptionFailure(format!("speech client setup failed: {}", e))
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    fn into_result(response: WhisperResponse) -> Result<TranscriptionResult, CoreError> {
        let text = response.text.ok_or_else(|| {
            CoreError::TranscriptionFailure("speech service returned no text".to_string())
        })?;

        Ok(TranscriptionResult {
            text: text.trim().to_string(),
            language: response.language.filter(|language| !language.is_empty()),
        })
    }
}

impl SpeechToTextClient for WhisperClient {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: String,
    ) -> Result<TranscriptionResult, CoreError> {
        let form = Form::new()
            .part("file", Part::bytes(audio).file_name(filename))
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Transcription request failed: {}", e);
                CoreError::TranscriptionFailure(format!("speech service unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Transcription API error: {} - {}", status, error_text);
            return Err(CoreError::TranscriptionFailure(format!(
                "speech service returned error: {} - {}",
                status, error_text
            )));
        }

        let body: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse transcription response: {}", e);
            CoreError::TranscriptionFailure(format!("Failed to parse transcription: {}", e))
        })?;

        Self::into_result(body)
    }
}
