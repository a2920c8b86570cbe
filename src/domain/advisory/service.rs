use super::error::AdvisoryServiceError;
use super::model::{AdvisoryAnswer, AdvisoryQuery};
use super::prompt::{image_prompt, text_prompt};
use crate::domain::tts::TtsServiceApi;
use crate::infrastructure::repositories::LlmRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const EMPTY_QUERY_MESSAGE: &str = "Please ask a question or upload an image.";

pub struct AdvisoryService {
    llm_repo: Arc<dyn LlmRepository>,
    tts_service: Arc<dyn TtsServiceApi>,
    request_timeout: Duration,
}

impl AdvisoryService {
    pub fn new(
        llm_repo: Arc<dyn LlmRepository>,
        tts_service: Arc<dyn TtsServiceApi>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            llm_repo,
            tts_service,
            request_timeout,
        }
    }
}

#[async_trait]
pub trait AdvisoryServiceApi: Send + Sync {
    /// Answer a farmer's query
    ///
    /// This operation:
    /// - Short-circuits with a prompt message when there is neither text nor image
    /// - Asks the language model for advice in the selected language
    /// - Voices the advice; missing audio never fails the request
    ///
    /// Fails when the model call fails or the whole pipeline exceeds the
    /// request deadline.
    async fn answer(&self, query: AdvisoryQuery) -> Result<AdvisoryAnswer, AdvisoryServiceError>;
}

#[async_trait]
impl AdvisoryServiceApi for AdvisoryService {
    async fn answer(&self, query: AdvisoryQuery) -> Result<AdvisoryAnswer, AdvisoryServiceError> {
        if query.text.trim().is_empty() && query.image.is_none() {
            tracing::info!("Empty query, asking the user for input");
            return Ok(AdvisoryAnswer {
                analysis: EMPTY_QUERY_MESSAGE.to_string(),
                audio: None,
            });
        }

        tokio::time::timeout(self.request_timeout, self.run(query))
            .await
            .map_err(|_| {
                tracing::error!(
                    timeout_secs = self.request_timeout.as_secs(),
                    "Advisory request exceeded its deadline"
                );
                AdvisoryServiceError::Unavailable(format!(
                    "request did not complete within {} seconds",
                    self.request_timeout.as_secs()
                ))
            })?
    }
}

impl AdvisoryService {
    async fn run(&self, query: AdvisoryQuery) -> Result<AdvisoryAnswer, AdvisoryServiceError> {
        tracing::info!(
            language = %query.language,
            text_length = query.text.chars().count(),
            has_image = query.image.is_some(),
            image_mime_type = query.image.as_ref().map(|i| i.mime_type).unwrap_or("none"),
            "Advisory request"
        );

        // 1. Build the prompt
        let prompt = match &query.image {
            Some(_) => image_prompt(&query.text, query.language),
            None => text_prompt(&query.text, query.language),
        };

        // 2. Ask the model; this is the only step that can fail the request
        let analysis = self
            .llm_repo
            .generate(&prompt, query.image.as_ref())
            .await
            .map_err(AdvisoryServiceError::Dependency)?;

        // 3. Voice the reply
        let audio = self.tts_service.synthesize(&analysis, query.language).await;

        Ok(AdvisoryAnswer { analysis, audio })
    }
}
