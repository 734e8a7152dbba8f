use std::time::Duration;

use crate::application::ports::{AudioToolError, RepositoryError, WorkspaceError};
use crate::domain::{PipelineStep, TaskId, TaskStateError};

use super::SynthesisError;

/// A fatal pipeline failure, tagged with the stage it happened in.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("task {task_id} disappeared during {step}")]
    TaskNotFound { step: PipelineStep, task_id: TaskId },
    #[error("repository during {step}: {source}")]
    Repository {
        step: PipelineStep,
        #[source]
        source: RepositoryError,
    },
    #[error("invalid task state during {step}: {source}")]
    State {
        step: PipelineStep,
        #[source]
        source: TaskStateError,
    },
    #[error("workspace during {step}: {source}")]
    Workspace {
        step: PipelineStep,
        #[source]
        source: WorkspaceError,
    },
    #[error("placeholder voice: {0}")]
    PlaceholderVoice(#[source] AudioToolError),
    #[error("synthesis: {0}")]
    Synthesis(#[source] SynthesisError),
    #[error("{step} timed out after {}s", limit.as_secs())]
    TimedOut { step: PipelineStep, limit: Duration },
}

impl PipelineError {
    pub fn step(&self) -> PipelineStep {
        match self {
            PipelineError::TaskNotFound { step, .. }
            | PipelineError::Repository { step, .. }
            | PipelineError::State { step, .. }
            | PipelineError::Workspace { step, .. }
            | PipelineError::TimedOut { step, .. } => *step,
            PipelineError::PlaceholderVoice(_) => PipelineStep::Tts,
            PipelineError::Synthesis(_) => PipelineStep::Mixing,
        }
    }
}
