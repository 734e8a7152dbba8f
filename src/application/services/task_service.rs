use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::application::ports::{
    RepositoryError, TaskEventPublisher, TaskRepository, WorkspaceError, WorkspaceStore,
};
use crate::domain::{
    AudioFile, PipelineStep, Task, TaskEvent, TaskId, TaskOptions, TaskOptionsError,
    TaskStateError, TaskStatus,
};

use super::TaskMessage;

pub const MAX_LIST_LIMIT: usize = 50;
pub const INTERRUPTED_MESSAGE: &str = "interrupted by server restart";

#[derive(Debug, Clone, Serialize)]
pub struct TaskDetails {
    #[serde(flatten)]
    pub task: Task,
    pub audio_files: Vec<AudioFile>,
}

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    workspaces: Arc<dyn WorkspaceStore>,
    publisher: Arc<dyn TaskEventPublisher>,
    sender: mpsc::Sender<TaskMessage>,
    workspace_retention: Duration,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        workspaces: Arc<dyn WorkspaceStore>,
        publisher: Arc<dyn TaskEventPublisher>,
        sender: mpsc::Sender<TaskMessage>,
        workspace_retention: Duration,
    ) -> Self {
        Self {
            repository,
            workspaces,
            publisher,
            sender,
            workspace_retention,
        }
    }

    /// Persists a pending task and queues it; the pipeline runs in the
    /// background.
    pub async fn create_task(&self, options: TaskOptions) -> Result<Task, TaskServiceError> {
        options.validate()?;

        let swept = self.sweep_stale_workspaces().await;
        if swept > 0 {
            tracing::info!(swept, "Removed stale task workspaces");
        }

        let mut task = Task::new(options.user_input.clone());
        let task_id = task.id;
        self.repository.create(&task).await?;
        self.publisher.publish(TaskEvent::TaskUpdated {
            task: Box::new(task.clone()),
        });

        match self.sender.try_send(TaskMessage { task_id, options }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(task_id = %task_id, "Task queue full, rejecting task");
                self.reject(&mut task, "task queue is full").await?;
                return Err(TaskServiceError::QueueFull);
            }
            Err(TrySendError::Closed(_)) => {
                tracing::error!(task_id = %task_id, "Task worker is not running");
                self.reject(&mut task, "task worker is not running").await?;
                return Err(TaskServiceError::WorkerUnavailable);
            }
        }

        tracing::info!(task_id = %task_id, "Task queued");
        Ok(task)
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Option<TaskDetails>, TaskServiceError> {
        let Some(task) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };
        let audio_files = self.repository.list_audio_files(id).await?;
        Ok(Some(TaskDetails { task, audio_files }))
    }

    pub async fn list_tasks(&self, limit: usize) -> Result<Vec<Task>, TaskServiceError> {
        let limit = limit.clamp(1, MAX_LIST_LIMIT);
        Ok(self.repository.list_recent(limit).await?)
    }

    /// Deletes every task, artifact record and task workspace. Irreversible.
    pub async fn clear_all_tasks(&self) -> Result<(), TaskServiceError> {
        self.repository.clear_all().await?;

        for entry in self.workspaces.list().await? {
            if let Err(e) = self.workspaces.remove(entry.task_id).await {
                tracing::warn!(error = %e, task_id = %entry.task_id, "Failed to remove workspace");
            }
        }

        tracing::warn!("All tasks cleared");
        Ok(())
    }

    /// Removes workspaces of finished or unknown tasks once they are older
    /// than the retention window. Errors are logged and skipped.
    pub async fn sweep_stale_workspaces(&self) -> usize {
        let entries = match self.workspaces.list().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list task workspaces");
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut removed = 0;
        for entry in entries {
            let age = now.duration_since(entry.modified).unwrap_or_default();
            if age < self.workspace_retention {
                continue;
            }

            let sweepable = match self.repository.get_by_id(entry.task_id).await {
                Ok(Some(task)) => task.status.is_terminal(),
                Ok(None) => true,
                Err(e) => {
                    tracing::warn!(error = %e, task_id = %entry.task_id, "Failed to look up workspace owner");
                    false
                }
            };
            if !sweepable {
                continue;
            }

            match self.workspaces.remove(entry.task_id).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(error = %e, task_id = %entry.task_id, "Failed to remove stale workspace");
                }
            }
        }
        removed
    }

    /// Fails every task a previous process left pending or processing. Their
    /// queue entries died with that process, so nothing would finish them.
    /// Run once at startup, before the worker accepts tasks.
    pub async fn fail_interrupted_tasks(&self) -> Result<usize, TaskServiceError> {
        let mut failed = 0;
        for status in TaskStatus::ALL.into_iter().filter(TaskStatus::is_active) {
            for mut task in self.repository.list_by_status(status).await? {
                let step = task.current_step;
                task.fail(step, INTERRUPTED_MESSAGE.to_string())?;
                self.repository.update(&task).await?;
                tracing::warn!(task_id = %task.id, step = %step, "Failed interrupted task");
                failed += 1;
            }
        }
        Ok(failed)
    }

    async fn reject(&self, task: &mut Task, reason: &str) -> Result<(), TaskServiceError> {
        task.fail(PipelineStep::Outline, reason.to_string())?;
        self.repository.update(task).await?;
        self.publisher.publish(TaskEvent::TaskUpdated {
            task: Box::new(task.clone()),
        });
        self.publisher.publish(TaskEvent::Failed {
            task_id: task.id,
            step: PipelineStep::Outline,
            message: reason.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    #[error("invalid task options: {0}")]
    InvalidOptions(#[from] TaskOptionsError),
    #[error("task queue is full")]
    QueueFull,
    #[error("task worker is not running")]
    WorkerUnavailable,
    #[error("invalid task state: {0}")]
    State(#[from] TaskStateError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("workspace: {0}")]
    Workspace(#[from] WorkspaceError),
}
