use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::Instrument;

use crate::domain::{TaskId, TaskOptions};

use super::TaskPipeline;

pub struct TaskMessage {
    pub task_id: TaskId,
    pub options: TaskOptions,
}

/// Bounded queue feeding the worker. `try_send` on a full queue is how
/// callers learn the pool is saturated.
pub fn task_queue(capacity: usize) -> (mpsc::Sender<TaskMessage>, mpsc::Receiver<TaskMessage>) {
    mpsc::channel(capacity.max(1))
}

/// Consumes queued tasks and runs at most `concurrency` pipelines at once,
/// each in its own tokio task so a panic stays contained.
pub struct TaskWorker {
    receiver: mpsc::Receiver<TaskMessage>,
    pipeline: Arc<TaskPipeline>,
    permits: Arc<Semaphore>,
}

impl TaskWorker {
    pub fn new(
        receiver: mpsc::Receiver<TaskMessage>,
        pipeline: Arc<TaskPipeline>,
        concurrency: usize,
    ) -> Self {
        Self {
            receiver,
            pipeline,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            concurrency = self.permits.available_permits(),
            "Task worker started"
        );

        while let Some(msg) = self.receiver.recv().await {
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                break;
            };

            let pipeline = Arc::clone(&self.pipeline);
            tokio::spawn(async move {
                let task_id = msg.task_id;
                let span = tracing::info_span!("task_pipeline", task_id = %task_id);
                let run = {
                    let pipeline = Arc::clone(&pipeline);
                    tokio::spawn(async move { pipeline.run(msg).await }.instrument(span.clone()))
                };

                if let Err(e) = run.await {
                    async {
                        tracing::error!(error = %e, "Task pipeline panicked");
                        let step = pipeline.current_step(task_id).await;
                        pipeline
                            .fail(task_id, step, format!("pipeline aborted: {e}"))
                            .await;
                    }
                    .instrument(span)
                    .await;
                }
                drop(permit);
            });
        }

        tracing::info!("Task worker stopped: channel closed");
    }
}
