use std::io;

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::UploadStoreError;
use crate::application::services::MAX_LIST_LIMIT;
use crate::domain::{BinauralPreset, TaskId, TaskOptions, UploadKey};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::{error_response, task_service_error_response};

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ClearTasksResponse {
    pub message: String,
}

/// A parsed create-task form plus the upload it staged, if any.
struct TaskForm {
    options: TaskOptions,
    upload: Option<UploadKey>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn create_task_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match read_task_form(&state, multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    tracing::debug!(
        user_input = %sanitize_prompt(&form.options.user_input),
        duration_secs = form.options.duration_secs,
        binaural = %form.options.binaural,
        "Creating task"
    );

    match state.task_service.create_task(form.options).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => {
            if let Some(key) = &form.upload {
                discard_upload(&state, key).await;
            }
            task_service_error_response(&e)
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(MAX_LIST_LIMIT);
    match state.task_service.list_tasks(limit).await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => task_service_error_response(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Response {
    let id = match task_id.parse::<TaskId>() {
        Ok(id) => id,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid task ID: {}", task_id),
            );
        }
    };

    match state.task_service.get_task(id).await {
        Ok(Some(details)) => (StatusCode::OK, Json(details)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("Task not found: {}", task_id),
        ),
        Err(e) => task_service_error_response(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn clear_tasks_handler(State(state): State<AppState>) -> Response {
    if let Err(e) = state.task_service.clear_all_tasks().await {
        return task_service_error_response(&e);
    }
    match state.uploads.clear().await {
        Ok(removed) => tracing::debug!(removed, "Staged uploads cleared"),
        Err(e) => tracing::warn!(error = %e, "Failed to clear staged uploads"),
    }

    (
        StatusCode::OK,
        Json(ClearTasksResponse {
            message: "All tasks cleared".to_string(),
        }),
    )
        .into_response()
}

/// Reads the form. A staged upload is deleted again when any later part of
/// the form is rejected.
async fn read_task_form(state: &AppState, multipart: Multipart) -> Result<TaskForm, Response> {
    let mut upload: Option<UploadKey> = None;
    match read_task_fields(state, multipart, &mut upload).await {
        Ok(options) => Ok(TaskForm { options, upload }),
        Err(response) => {
            if let Some(key) = &upload {
                discard_upload(state, key).await;
            }
            Err(response)
        }
    }
}

async fn read_task_fields(
    state: &AppState,
    mut multipart: Multipart,
    upload: &mut Option<UploadKey>,
) -> Result<TaskOptions, Response> {
    let mut options = TaskOptions::new(String::new());
    let mut ambient: Option<Vec<String>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        if name == "background_music" {
            if let Some(key) = stage_upload(state, field).await? {
                options.background_music = Some(state.uploads.local_path(&key));
                if let Some(previous) = upload.replace(key) {
                    discard_upload(state, &previous).await;
                }
            }
            continue;
        }

        let value = match field.text().await {
            Ok(value) => value,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read field {}: {}", name, e),
                ));
            }
        };

        match name.as_str() {
            "user_input" => options.user_input = value,
            "duration" => {
                let secs: f64 = parse_field(&name, &value)?;
                options.duration_secs = if secs.is_finite() && secs > 0.0 {
                    secs.round() as u32
                } else {
                    0
                };
            }
            "binaural_type" => {
                options.binaural = value
                    .parse::<BinauralPreset>()
                    .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;
            }
            "noise_types" => {
                let ids = ambient.get_or_insert_with(Vec::new);
                ids.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string),
                );
            }
            "voice_speed" => options.tempo = parse_field(&name, &value)?,
            "volume_voice" => options.volumes.voice = parse_field(&name, &value)?,
            "volume_binaural" => options.volumes.binaural = parse_field(&name, &value)?,
            "volume_background" => options.volumes.background = parse_field(&name, &value)?,
            "volume_environment" => options.volumes.environment = parse_field(&name, &value)?,
            "audio_name" => {
                let trimmed = value.trim();
                options.output_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    if let Some(ids) = ambient {
        options.ambient = ids;
    }

    Ok(options)
}

async fn discard_upload(state: &AppState, key: &UploadKey) {
    if let Err(e) = state.uploads.delete(key).await {
        tracing::warn!(error = %e, key = %key, "Failed to delete rejected upload");
    }
}

async fn stage_upload(state: &AppState, field: Field<'_>) -> Result<Option<UploadKey>, Response> {
    let Some(filename) = field.file_name().map(str::to_string).filter(|f| !f.is_empty()) else {
        return Ok(None);
    };

    let content_type = field.content_type().unwrap_or("application/octet-stream");
    if !content_type.starts_with("audio/") {
        return Err(error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("Unsupported content type: {}", content_type),
        ));
    }

    let key = UploadKey::new(Uuid::new_v4(), &filename);
    let stream = field.map_err(io::Error::other).boxed();

    match state.uploads.store(&key, stream).await {
        Ok(bytes) => {
            tracing::debug!(key = %key, bytes, "Background music staged");
            Ok(Some(key))
        }
        Err(UploadStoreError::TooLarge { limit }) => Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Background music exceeds {} bytes", limit),
        )),
        Err(e) => {
            tracing::error!(error = %e, "Failed to stage upload");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store upload: {}", e),
            ))
        }
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, Response> {
    value.trim().parse::<T>().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid value for {}: {}", name, value),
        )
    })
}
