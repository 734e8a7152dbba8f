use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio::sync::broadcast::error::RecvError;

use crate::domain::TaskEvent;
use crate::presentation::state::AppState;

const KEEP_ALIVE_SECS: u64 = 15;

/// Streams every task event as JSON until the client disconnects.
pub async fn events_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut receiver = state.events.subscribe();
    tracing::debug!("Event stream opened");

    let sse_stream = async_stream::stream! {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let kind = event_name(&event);
                    match serde_json::to_string(&event) {
                        Ok(json) => yield Ok::<_, Infallible>(Event::default().event(kind).data(json)),
                        Err(e) => tracing::error!(error = %e, "Failed to serialize task event"),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event stream lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(sse_stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(KEEP_ALIVE_SECS))
            .text("keep-alive"),
    )
}

fn event_name(event: &TaskEvent) -> &'static str {
    match event {
        TaskEvent::Progress { .. } => "progress",
        TaskEvent::Step { .. } => "step",
        TaskEvent::TaskUpdated { .. } => "task_updated",
        TaskEvent::Completed { .. } => "completed",
        TaskEvent::Failed { .. } => "failed",
    }
}
