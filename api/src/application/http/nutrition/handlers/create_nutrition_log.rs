use axum::extract::State;
use mealscribe_core::domain::nutrition::{
    entities::NutritionLog, ports::NutritionService, value_objects::MealDescription,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    nutrition::validators::CreateNutritionLogRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct NutritionLogResponse {
    pub data: NutritionLog,
}

#[utoipa::path(
    post,
    path = "/nutrition-logs",
    tag = "nutrition",
    summary = "Create a nutrition log from text",
    description = "Extracts food items, calorie estimates and health insights from a free-text meal description",
    responses(
        (status = 200, body = NutritionLogResponse),
        (status = 400, body = ErrorResponse),
        (status = 422, description = "The description could not be turned into a log", body = ErrorResponse)
    ),
    request_body = CreateNutritionLogRequest
)]
#[tracing::instrument(skip_all, fields(request_id = %Uuid::now_v7()))]
pub async fn create_nutrition_log(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateNutritionLogRequest>,
) -> Result<Response<NutritionLogResponse>, ApiError> {
    let description = MealDescription::try_from(payload.text)?;

    let log = state.service.extract(description).await?;

    Ok(Response::OK(NutritionLogResponse { data: log }))
}
