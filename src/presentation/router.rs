use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    clear_tasks_handler, create_task_handler, delete_config_handler, download_handler,
    events_handler, get_task_handler, health_handler, list_configs_handler, list_tasks_handler,
    preview_audio_handler, save_config_handler, save_last_used_config_handler,
};
use crate::presentation::state::AppState;

/// Headroom for the text fields sent alongside an uploaded file.
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit =
        usize::try_from(state.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES)).unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/tasks",
            get(list_tasks_handler)
                .post(create_task_handler)
                .delete(clear_tasks_handler),
        )
        .route("/api/v1/tasks/{task_id}", get(get_task_handler))
        .route("/api/v1/events", get(events_handler))
        .route(
            "/api/v1/audio/{category}/{filename}",
            get(preview_audio_handler),
        )
        .route("/api/v1/download/{filename}", get(download_handler))
        .route(
            "/api/v1/configs",
            get(list_configs_handler).post(save_config_handler),
        )
        .route(
            "/api/v1/configs/last-used",
            post(save_last_used_config_handler),
        )
        .route("/api/v1/configs/{config_id}", delete(delete_config_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
