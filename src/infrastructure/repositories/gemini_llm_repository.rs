use super::llm_repository::LlmRepository;
use crate::domain::advisory::ImageAttachment;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined in order
    fn into_text(self) -> Result<String, String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(format!("Gemini blocked the prompt: {}", reason));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| "Gemini returned no candidates".to_string())?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(format!(
                "Gemini returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ));
        }

        Ok(text)
    }
}

/// Gemini `generateContent` client
pub struct GeminiLlmRepository {
    api_key: String,
    model: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl GeminiLlmRepository {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, String> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build Gemini HTTP client: {}", e))?;

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmRepository for GeminiLlmRepository {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        let mut parts = vec![RequestPart::Text { text: prompt }];
        if let Some(image) = image {
            parts.push(RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type,
                    data: STANDARD.encode(&image.data),
                },
            });
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            has_image = image.is_some(),
            "Calling Gemini generateContent"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Gemini request failed");
                format!("Gemini request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(status = %status, body = %error_text, "Gemini returned an error");
            return Err(format!("Gemini error ({}): {}", status, error_text));
        }

        let text = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| format!("Failed to parse Gemini response: {}", e))?
            .into_text()?;

        tracing::info!(
            provider = "gemini",
            latency_ms = start_time.elapsed().as_millis(),
            reply_length = text.chars().count(),
            "Gemini reply received"
        );

        Ok(text)
    }
}
