use serde::Serialize;

use super::{PipelineStep, Task, TaskId, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Processing,
    Completed,
    Failed,
}

/// Everything the pipeline broadcasts while a task runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    Progress {
        task_id: TaskId,
        status: TaskStatus,
        step: PipelineStep,
        progress: u8,
        message: String,
    },
    Step {
        task_id: TaskId,
        step: PipelineStep,
        status: StepStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    TaskUpdated {
        task: Box<Task>,
    },
    Completed {
        task_id: TaskId,
        output_file: String,
    },
    Failed {
        task_id: TaskId,
        step: PipelineStep,
        message: String,
    },
}

impl TaskEvent {
    pub fn task_id(&self) -> TaskId {
        match self {
            TaskEvent::Progress { task_id, .. }
            | TaskEvent::Step { task_id, .. }
            | TaskEvent::Completed { task_id, .. }
            | TaskEvent::Failed { task_id, .. } => *task_id,
            TaskEvent::TaskUpdated { task } => task.id,
        }
    }

    pub fn step(task_id: TaskId, step: PipelineStep, status: StepStatus) -> Self {
        TaskEvent::Step {
            task_id,
            step,
            status,
            content: None,
            file: None,
            error: None,
        }
    }

    pub fn step_with_content(task_id: TaskId, step: PipelineStep, content: String) -> Self {
        TaskEvent::Step {
            task_id,
            step,
            status: StepStatus::Completed,
            content: Some(content),
            file: None,
            error: None,
        }
    }

    pub fn step_with_file(task_id: TaskId, step: PipelineStep, file: String) -> Self {
        TaskEvent::Step {
            task_id,
            step,
            status: StepStatus::Completed,
            content: None,
            file: Some(file),
            error: None,
        }
    }

    pub fn step_failed(task_id: TaskId, step: PipelineStep, error: String) -> Self {
        TaskEvent::Step {
            task_id,
            step,
            status: StepStatus::Failed,
            content: None,
            file: None,
            error: Some(error),
        }
    }
}
