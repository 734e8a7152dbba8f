use std::path::{Path as FsPath, PathBuf};

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::domain::TaskId;
use crate::infrastructure::audio::FsAmbientCatalog;
use crate::presentation::state::AppState;

use super::error::error_response;

/// Separates the task id from the file name in workspace artifact names.
pub const WORKSPACE_SEPARATOR: &str = "--";

/// Serves an artifact for in-browser preview, honouring `Range` requests.
#[tracing::instrument(skip(state, request))]
pub async fn preview_audio_handler(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
    request: Request,
) -> Response {
    let path = match resolve_artifact(&state, &category, &filename) {
        Ok(path) => path,
        Err(response) => return response,
    };
    serve_file(&path, request).await
}

#[tracing::instrument(skip(state, request))]
pub async fn download_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Response {
    if !is_plain_file_name(&filename) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid file name");
    }
    let path = state.workspaces.output_dir().join(&filename);
    let mut response = serve_file(&path, request).await;
    if response.status().is_success() {
        if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename)) {
            response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
        }
    }
    response
}

fn resolve_artifact(state: &AppState, category: &str, filename: &str) -> Result<PathBuf, Response> {
    let invalid = || error_response(StatusCode::BAD_REQUEST, "Invalid file name");

    match category {
        "output" => {
            if !is_plain_file_name(filename) {
                return Err(invalid());
            }
            Ok(state.workspaces.output_dir().join(filename))
        }
        "workspace" => {
            let (task_id, file) = filename
                .split_once(WORKSPACE_SEPARATOR)
                .ok_or_else(invalid)?;
            let task_id = task_id.parse::<TaskId>().map_err(|_| invalid())?;
            if !is_plain_file_name(file) {
                return Err(invalid());
            }
            Ok(state.workspaces.workspace_path(task_id).join(file))
        }
        "ambient" => {
            let id = filename
                .rsplit_once('.')
                .map_or(filename, |(stem, _)| stem);
            let relative = FsAmbientCatalog::relative_path(id).ok_or_else(|| {
                error_response(StatusCode::NOT_FOUND, format!("Unknown ambient track: {}", id))
            })?;
            Ok(state.assets_dir.join(relative))
        }
        other => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Unknown audio category: {}", other),
        )),
    }
}

pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

pub fn content_type_for(path: &FsPath) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Hands the request to `ServeFile`, which answers `Range` with 206/416 and
/// advertises `Accept-Ranges`. Missing files get the JSON error body.
async fn serve_file(path: &FsPath, request: Request) -> Response {
    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    };

    match response.status() {
        StatusCode::NOT_FOUND => error_response(StatusCode::NOT_FOUND, "Audio file not found"),
        status if status.is_server_error() => {
            tracing::error!(status = %status, path = %path.display(), "Failed to serve audio file");
            error_response(status, "Failed to read audio file")
        }
        status if status.is_success() => {
            let mut response = response;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type_for(path)),
            );
            response
        }
        _ => response,
    }
}
