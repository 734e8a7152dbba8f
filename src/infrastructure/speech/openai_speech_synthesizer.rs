use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};
use crate::domain::TaskId;

const VOICE_FILE_NAME: &str = "voice.mp3";

/// OpenAI-compatible `/audio/speech` endpoint.
pub struct OpenAiSpeechSynthesizer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    voice: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'static str,
}

impl OpenAiSpeechSynthesizer {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        voice: String,
        request_timeout: Duration,
    ) -> Result<Self, SpeechSynthesisError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            voice,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        task_id: TaskId,
        workspace: &Path,
    ) -> Result<PathBuf, SpeechSynthesisError> {
        let request = SpeechRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
            response_format: "mp3",
        };

        tracing::debug!(task_id = %task_id, chars = text.chars().count(), model = %self.model, "Requesting speech");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechSynthesisError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;
        if audio.is_empty() {
            return Err(SpeechSynthesisError::EmptyAudio);
        }

        tokio::fs::create_dir_all(workspace).await?;
        let path = workspace.join(VOICE_FILE_NAME);
        tokio::fs::write(&path, &audio).await?;

        tracing::info!(task_id = %task_id, bytes = audio.len(), "Voice track written");
        Ok(path)
    }
}
