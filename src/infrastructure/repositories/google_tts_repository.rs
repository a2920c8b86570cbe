use super::tts_repository::TtsRepository;
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use std::time::Duration;

/// Google Translate's public speech endpoint
pub struct GoogleTtsRepository {
    base_url: String,
    http_client: reqwest::Client,
}

impl GoogleTtsRepository {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, String> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build TTS HTTP client: {}", e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn speech_url(&self, text: &str, language: LanguageCode) -> String {
        format!(
            "{}/translate_tts?ie=UTF-8&q={}&tl={}&client=tw-ob",
            self.base_url,
            urlencoding::encode(text),
            language.tts_code()
        )
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if text.trim().is_empty() {
            return Err("Refusing to synthesize empty text".to_string());
        }

        tracing::debug!(
            language = %language,
            text_length = text.chars().count(),
            "Calling Google TTS"
        );

        let response = self
            .http_client
            .get(self.speech_url(text, language))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    format!("Google TTS timed out: {}", e)
                } else {
                    format!("Google TTS request failed: {}", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Google TTS error ({})", status));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS audio: {}", e))?
            .to_vec();

        if audio_bytes.is_empty() {
            return Err("Google TTS returned an empty body".to_string());
        }

        tracing::debug!(audio_size = audio_bytes.len(), "Google TTS audio received");

        Ok(audio_bytes)
    }
}
