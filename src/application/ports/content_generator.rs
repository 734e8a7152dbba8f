use async_trait::async_trait;

use crate::domain::GeneratedContent;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, user_input: &str) -> Result<GeneratedContent, ContentGenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ContentGenerationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("workflow failed: {0}")]
    WorkflowFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
