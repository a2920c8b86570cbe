use crate::domain::advisory::ImageAttachment;
use async_trait::async_trait;

/// Repository for the generative language model.
/// Abstracts the underlying provider (Gemini today).
#[async_trait]
pub trait LlmRepository: Send + Sync {
    /// Generate a reply for `prompt`, optionally grounded on an image
    ///
    /// # Errors
    /// Returns an error if the model is unreachable, rejects the request
    /// (quota, malformed image) or produces no text
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, String>;
}
