use crate::domain::tts::LanguageCode;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying speech endpoint.
///
/// Implementations synthesize exactly the text they are given. Splitting
/// replies to fit the endpoint's length limit and stitching the results
/// together happens in the domain layer.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one chunk of text to speech
    ///
    /// Returns the encoded audio exactly as the provider sent it (MP3 for
    /// Google Translate)
    ///
    /// # Errors
    /// Returns an error if the provider is unreachable, answers with a
    /// non-success status, or sends an empty body
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String>;
}
