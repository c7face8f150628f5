use axum::extract::{Multipart, State};
use mealscribe_core::domain::transcription::{
    entities::TranscriptionResult, ports::TranscriptionService,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
    transcription::validators::{AudioUploadForm, read_audio_field},
};

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct TranscriptionResponse {
    pub data: TranscriptionResult,
}

#[utoipa::path(
    post,
    path = "/transcriptions",
    tag = "transcription",
    summary = "Transcribe a voice recording",
    responses(
        (status = 200, body = TranscriptionResponse),
        (status = 400, body = ErrorResponse),
        (status = 413, description = "Audio too large", body = ErrorResponse),
        (status = 422, description = "No speech could be recognised", body = ErrorResponse)
    ),
    request_body(content = AudioUploadForm, content_type = "multipart/form-data")
)]
#[tracing::instrument(skip_all, fields(request_id = %Uuid::now_v7()))]
pub async fn transcribe_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<TranscriptionResponse>, ApiError> {
    let input = read_audio_field(multipart).await?;

    let result = state.service.transcribe_audio(input).await?;

    Ok(Response::OK(TranscriptionResponse { data: result }))
}
