use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::TaskId;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Renders `text` into a voice track inside `workspace` and returns its path.
    async fn synthesize(
        &self,
        text: &str,
        task_id: TaskId,
        workspace: &Path,
    ) -> Result<PathBuf, SpeechSynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechSynthesisError {
    #[error("speech synthesis is not configured")]
    NotConfigured,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("empty audio response")]
    EmptyAudio,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
