use async_trait::async_trait;

use crate::application::ports::{ContentGenerationError, ContentGenerator};
use crate::domain::GeneratedContent;

/// Used when no workflow backend is configured.
pub struct PlaceholderContentGenerator;

#[async_trait]
impl ContentGenerator for PlaceholderContentGenerator {
    async fn generate(&self, user_input: &str) -> Result<GeneratedContent, ContentGenerationError> {
        Ok(GeneratedContent::placeholder(user_input))
    }
}
