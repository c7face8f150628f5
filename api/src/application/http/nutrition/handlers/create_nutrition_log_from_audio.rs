use axum::extract::{Multipart, State};
use mealscribe_core::domain::nutrition::ports::NutritionService;
use uuid::Uuid;

use super::create_nutrition_log::NutritionLogResponse;
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

#[utoipa::path(
    post,
    path = "/nutrition-logs/audio",
    tag = "nutrition",
    summary = "Create a nutrition log from a voice recording",
    description = "Transcribes the recording, then extracts a nutrition log from the transcript",
    responses(
        (status = 200, body = NutritionLogResponse),
        (status = 400, body = ErrorResponse),
        (status = 413, description = "Audio too large", body = ErrorResponse),
        (status = 422, description = "The audio or its transcript could not be understood", body = ErrorResponse)
    ),
    request_body(content = AudioUploadForm, content_type = "multipart/form-data")
)]
#[tracing::instrument(skip_all, fields(request_id = %Uuid::now_v7()))]
pub async fn create_nutrition_log_from_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<NutritionLogResponse>, ApiError> {
    let input = read_audio_field(multipart).await?;

    let log = state.service.extract_from_audio(input).await?;

    Ok(Response::OK(NutritionLogResponse { data: log }))
}
