use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::presentation::state::AppState;

use super::error::{config_preset_error_response, error_response};

#[derive(Debug, Deserialize)]
pub struct SaveConfigRequest {
    pub name: Option<String>,
    pub config: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LastUsedConfigRequest {
    pub config: Option<Value>,
}

#[derive(Serialize)]
pub struct ConfigMessageResponse {
    pub message: String,
}

fn message(text: &str) -> Response {
    (
        StatusCode::OK,
        Json(ConfigMessageResponse {
            message: text.to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn list_configs_handler(State(state): State<AppState>) -> Response {
    match state.config_presets.list().await {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => config_preset_error_response(&e),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn save_config_handler(
    State(state): State<AppState>,
    Json(request): Json<SaveConfigRequest>,
) -> Response {
    let (Some(name), Some(config)) = (request.name, request.config.filter(|c| !c.is_null())) else {
        return error_response(StatusCode::BAD_REQUEST, "Name and config are required");
    };

    match state.config_presets.save(&name, config).await {
        Ok(preset) => (StatusCode::OK, Json(preset)).into_response(),
        Err(e) => config_preset_error_response(&e),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn save_last_used_config_handler(
    State(state): State<AppState>,
    Json(request): Json<LastUsedConfigRequest>,
) -> Response {
    let Some(config) = request.config.filter(|c| !c.is_null()) else {
        return error_response(StatusCode::BAD_REQUEST, "Config is required");
    };

    match state.config_presets.save_last_used(config).await {
        Ok(_) => message("Last used config saved successfully"),
        Err(e) => config_preset_error_response(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_config_handler(
    State(state): State<AppState>,
    Path(config_id): Path<String>,
) -> Response {
    let Ok(id) = config_id.parse::<Uuid>() else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid config ID: {}", config_id),
        );
    };

    match state.config_presets.delete(id).await {
        Ok(()) => message("Config deleted successfully"),
        Err(e) => config_preset_error_response(&e),
    }
}
