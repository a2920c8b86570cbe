use super::assembler::{AudioAssembler, SynthesizedAudio};
use super::chunker::TextChunker;
use super::language::LanguageCode;
use async_trait::async_trait;

pub struct TtsService {
    chunker: TextChunker,
    assembler: AudioAssembler,
}

impl TtsService {
    pub fn new(chunker: TextChunker, assembler: AudioAssembler) -> Self {
        Self { chunker, assembler }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Voice a model reply
    ///
    /// This operation:
    /// - Splits the reply into chunks the speech endpoint accepts
    /// - Synthesizes every chunk, skipping the ones that fail
    /// - Stitches the chunk audio into one file, in reply order
    ///
    /// Returns `None` when no audio could be produced. Never fails.
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Option<SynthesizedAudio>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Option<SynthesizedAudio> {
        let start_time = std::time::Instant::now();

        let chunks = self.chunker.split(text);
        tracing::info!(
            chunk_count = chunks.len(),
            text_length = text.chars().count(),
            max_chunk_length = self.chunker.max_chunk_length(),
            language = %language,
            "Reply split into chunks"
        );

        let audio = self.assembler.assemble(&chunks, language).await;

        tracing::info!(
            latency_ms = start_time.elapsed().as_millis(),
            has_audio = audio.is_some(),
            audio_size_bytes = audio.as_ref().map(|a| a.audio_data.len()).unwrap_or(0),
            duration_secs = audio.as_ref().map(|a| a.duration_secs).unwrap_or(0.0),
            "TTS synthesis completed"
        );

        audio
    }
}
