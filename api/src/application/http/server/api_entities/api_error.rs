use axum::{
    Json,
    extract::{FromRequest, Request, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mealscribe_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{message}")]
    UnprocessableEntity { code: &'static str, message: String },

    #[error("{0}")]
    BadGateway(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub status: i64,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "E_PAYLOAD_TOO_LARGE"),
            ApiError::UnprocessableEntity { code, .. } => (StatusCode::UNPROCESSABLE_ENTITY, code),
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "E_UPSTREAM_UNAVAILABLE"),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::TranscriptionFailure(_) => ApiError::UnprocessableEntity {
                code: "E_TRANSCRIPTION_FAILED",
                message: error.to_string(),
            },
            CoreError::ExtractionFailure(_) => ApiError::UnprocessableEntity {
                code: "E_EXTRACTION_FAILED",
                message: error.to_string(),
            },
            CoreError::ExternalServiceError(_) => ApiError::BadGateway(error.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(error.body_text())
        } else {
            ApiError::BadRequest(error.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            status: status.as_u16() as i64,
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use mealscribe_core::domain::nutrition::errors::{ExtractionCause, ValidationError};

    use super::*;

    async fn render(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let (status, body) =
            render(ApiError::from(CoreError::Invalid("description is empty".into()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "E_BAD_REQUEST");
        assert_eq!(body.message, "description is empty");
        assert_eq!(body.status, 400);
    }

    #[tokio::test]
    async fn test_extraction_failure_is_unprocessable() {
        let error = CoreError::from(ExtractionCause::InvalidStructure(
            ValidationError::MissingItems,
        ));
        let (status, body) = render(ApiError::from(error)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, "E_EXTRACTION_FAILED");
        assert!(body.message.starts_with("could not parse food description"));
    }

    #[tokio::test]
    async fn test_transcription_failure_is_unprocessable() {
        let (status, body) = render(ApiError::from(CoreError::TranscriptionFailure(
            "no speech recognised".into(),
        )))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, "E_TRANSCRIPTION_FAILED");
        assert!(body.message.starts_with("could not understand audio"));
    }

    #[tokio::test]
    async fn test_external_service_error_is_bad_gateway() {
        let (status, body) = render(ApiError::from(CoreError::ExternalServiceError(
            "timeout".into(),
        )))
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.status, 502);
    }
}
