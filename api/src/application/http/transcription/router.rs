use super::handlers::transcribe_audio::{__path_transcribe_audio, transcribe_audio};
use super::validators::MAX_AUDIO_BYTES;
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(transcribe_audio))]
pub struct TranscriptionApiDoc;

pub fn transcription_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/transcriptions", state.args.server.root_path),
        post(transcribe_audio).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
    )
}
