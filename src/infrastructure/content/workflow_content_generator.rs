use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{ContentGenerationError, ContentGenerator};
use crate::domain::GeneratedContent;

const OUTLINE_POINTERS: &[&str] = &["/data/outputs/text2", "/outputs/text2", "/text2"];
const CONTENT_POINTERS: &[&str] = &["/data/outputs/text", "/outputs/text", "/text", "/answer"];
const RETRY_STEP: Duration = Duration::from_secs(2);

/// Calls a hosted workflow that writes both the outline and the narration
/// script in one blocking run.
pub struct WorkflowContentGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    user: String,
    max_attempts: u32,
    retry_step: Duration,
}

#[derive(Serialize)]
struct WorkflowRequest<'a> {
    inputs: WorkflowInputs<'a>,
    response_mode: &'static str,
    user: &'a str,
}

#[derive(Serialize)]
struct WorkflowInputs<'a> {
    message: &'a str,
}

impl WorkflowContentGenerator {
    pub fn new(
        base_url: String,
        api_key: String,
        user: String,
        max_attempts: u32,
        request_timeout: Duration,
    ) -> Result<Self, ContentGenerationError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ContentGenerationError::ApiRequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            user,
            max_attempts: max_attempts.max(1),
            retry_step: RETRY_STEP,
        })
    }

    /// Base delay between attempts; attempt `n` waits `n * step`.
    pub fn with_retry_step(mut self, retry_step: Duration) -> Self {
        self.retry_step = retry_step;
        self
    }

    async fn run_workflow(&self, user_input: &str) -> Result<GeneratedContent, ContentGenerationError> {
        let url = format!("{}/workflows/run", self.base_url);
        let request = WorkflowRequest {
            inputs: WorkflowInputs {
                message: user_input,
            },
            response_mode: "blocking",
            user: &self.user,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ContentGenerationError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ContentGenerationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ContentGenerationError::InvalidResponse(e.to_string()))?;

        parse_workflow_response(&body)
    }
}

#[async_trait]
impl ContentGenerator for WorkflowContentGenerator {
    async fn generate(&self, user_input: &str) -> Result<GeneratedContent, ContentGenerationError> {
        let mut attempt = 1;
        loop {
            match self.run_workflow(user_input).await {
                Ok(content) => return Ok(content),
                Err(e) if attempt < self.max_attempts => {
                    let delay = self.retry_step * attempt;
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "Content workflow failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Pulls the outline and script out of a workflow run, accepting the field
/// layouts the service has been seen to return.
pub fn parse_workflow_response(body: &Value) -> Result<GeneratedContent, ContentGenerationError> {
    let status = body
        .pointer("/data/status")
        .or_else(|| body.pointer("/status"))
        .and_then(Value::as_str);
    if status == Some("failed") {
        let error = body
            .pointer("/data/error")
            .or_else(|| body.pointer("/error"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(ContentGenerationError::WorkflowFailed(error.to_string()));
    }

    let outline = first_text(body, OUTLINE_POINTERS);
    let content = first_text(body, CONTENT_POINTERS);

    GeneratedContent::from_partial(outline, content).ok_or_else(|| {
        ContentGenerationError::InvalidResponse("workflow returned no text outputs".to_string())
    })
}

fn first_text(body: &Value, pointers: &[&str]) -> Option<String> {
    pointers
        .iter()
        .filter_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
