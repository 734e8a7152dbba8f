use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{ConfigPresetServiceError, TaskServiceError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

pub fn task_service_error_response(error: &TaskServiceError) -> Response {
    let status = match error {
        TaskServiceError::InvalidOptions(_) => StatusCode::BAD_REQUEST,
        TaskServiceError::QueueFull | TaskServiceError::WorkerUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        TaskServiceError::State(_)
        | TaskServiceError::Repository(_)
        | TaskServiceError::Workspace(_) => {
            tracing::error!(error = %error, "Task service failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}

pub fn config_preset_error_response(error: &ConfigPresetServiceError) -> Response {
    let status = match error {
        ConfigPresetServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        ConfigPresetServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ConfigPresetServiceError::Repository(_) => {
            tracing::error!(error = %error, "Config preset store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}
