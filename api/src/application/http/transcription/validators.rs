use axum::extract::Multipart;
use mealscribe_core::domain::transcription::TranscribeAudioInput;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024; // 25 MB

const AUDIO_FIELD: &str = "audio";

/// Multipart body accepted by the audio routes.
#[derive(Debug, ToSchema)]
pub struct AudioUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub audio: Vec<u8>,
}

/// Reads the `audio` field of a multipart form. Other fields are ignored.
pub async fn read_audio_field(mut multipart: Multipart) -> Result<TranscribeAudioInput, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::from(e)
    })? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            error!("Failed to read audio bytes: {}", e);
            ApiError::from(e)
        })?;

        if data.is_empty() {
            warn!(filename = ?filename, "Empty audio upload attempted");
            return Err(ApiError::BadRequest("Audio cannot be empty".to_string()));
        }

        return Ok(TranscribeAudioInput::new(data.to_vec(), filename));
    }

    Err(ApiError::BadRequest(
        "Missing 'audio' field in multipart form".to_string(),
    ))
}
