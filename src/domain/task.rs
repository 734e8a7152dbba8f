use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{PipelineStep, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub user_input: String,
    pub status: TaskStatus,
    pub current_step: PipelineStep,
    pub progress: u8,
    pub message: Option<String>,
    pub outline: Option<String>,
    pub content: Option<String>,
    pub error_message: Option<String>,
    pub output_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(user_input: String) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            user_input,
            status: TaskStatus::Pending,
            current_step: PipelineStep::Outline,
            progress: 0,
            message: None,
            outline: None,
            content: None,
            error_message: None,
            output_file: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn start(&mut self) -> Result<(), TaskStateError> {
        if self.status != TaskStatus::Pending {
            return Err(TaskStateError::InvalidTransition {
                from: self.status,
                to: TaskStatus::Processing,
            });
        }
        self.status = TaskStatus::Processing;
        self.touch();
        Ok(())
    }

    /// Moves the task forward. Step and progress never go backwards, so a
    /// late update from a concurrent branch cannot regress either value.
    pub fn advance(
        &mut self,
        step: PipelineStep,
        progress: u8,
        message: impl Into<String>,
    ) -> Result<(), TaskStateError> {
        self.ensure_processing()?;
        self.current_step = self.current_step.max(step);
        self.progress = self.progress.max(progress.min(100));
        self.message = Some(message.into());
        self.touch();
        Ok(())
    }

    pub fn record_content(&mut self, outline: String, content: String) -> Result<(), TaskStateError> {
        self.ensure_processing()?;
        if self.outline.is_some() || self.content.is_some() {
            return Err(TaskStateError::ContentAlreadySet);
        }
        self.outline = Some(outline);
        self.content = Some(content);
        self.touch();
        Ok(())
    }

    pub fn complete(&mut self, output_file: String) -> Result<(), TaskStateError> {
        self.ensure_processing()?;
        self.status = TaskStatus::Completed;
        self.current_step = PipelineStep::Export;
        self.progress = 100;
        self.output_file = Some(output_file);
        self.touch();
        Ok(())
    }

    /// Pending tasks may fail too (e.g. the queue rejected them).
    pub fn fail(&mut self, step: PipelineStep, error_message: String) -> Result<(), TaskStateError> {
        if self.status.is_terminal() {
            return Err(TaskStateError::InvalidTransition {
                from: self.status,
                to: TaskStatus::Failed,
            });
        }
        self.status = TaskStatus::Failed;
        self.current_step = step;
        self.error_message = Some(error_message);
        self.touch();
        Ok(())
    }

    fn ensure_processing(&self) -> Result<(), TaskStateError> {
        if self.status == TaskStatus::Processing {
            Ok(())
        } else {
            Err(TaskStateError::NotProcessing(self.status))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskStateError {
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },
    #[error("task is {0}, not processing")]
    NotProcessing(TaskStatus),
    #[error("outline and content are already set")]
    ContentAlreadySet,
}
