use super::handlers::{
    create_nutrition_log::{__path_create_nutrition_log, create_nutrition_log},
    create_nutrition_log_from_audio::{
        __path_create_nutrition_log_from_audio, create_nutrition_log_from_audio,
    },
};
use crate::application::http::{
    server::app_state::AppState, transcription::validators::MAX_AUDIO_BYTES,
};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(create_nutrition_log, create_nutrition_log_from_audio))]
pub struct NutritionApiDoc;

pub fn nutrition_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/nutrition-logs", state.args.server.root_path),
            post(create_nutrition_log),
        )
        .route(
            &format!("{}/nutrition-logs/audio", state.args.server.root_path),
            post(create_nutrition_log_from_audio).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
}
