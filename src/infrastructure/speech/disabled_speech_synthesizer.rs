use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};
use crate::domain::TaskId;

/// Stand-in when no speech backend is configured; the pipeline substitutes
/// a silent voice track.
pub struct DisabledSpeechSynthesizer;

#[async_trait]
impl SpeechSynthesizer for DisabledSpeechSynthesizer {
    async fn synthesize(
        &self,
        _text: &str,
        _task_id: TaskId,
        _workspace: &Path,
    ) -> Result<PathBuf, SpeechSynthesisError> {
        Err(SpeechSynthesisError::NotConfigured)
    }
}
