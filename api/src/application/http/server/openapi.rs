use utoipa::OpenApi;

use crate::application::http::{
    nutrition::router::NutritionApiDoc, transcription::router::TranscriptionApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MealScribe API",
        description = "Turns spoken or typed meal descriptions into structured nutrition logs"
    ),
    tags(
        (name = "nutrition", description = "Nutrition log extraction"),
        (name = "transcription", description = "Speech to text")
    )
)]
pub struct ApiDoc;

pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(NutritionApiDoc::openapi());
    doc.merge(TranscriptionApiDoc::openapi());
    doc
}
