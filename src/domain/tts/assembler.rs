use super::audio::{AudioError, AudioSegment, CombinedAudio, WAV_MIME_TYPE};
use super::language::LanguageCode;
use crate::infrastructure::repositories::TtsRepository;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

/// Combined speech for one reply
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio_data: Vec<u8>,
    pub mime_type: &'static str,
    pub duration_secs: f32,
    pub chunks_requested: usize,
    pub segments_used: usize,
}

/// What became of one chunk
#[derive(Debug)]
pub(crate) enum SegmentOutcome {
    Synthesized(AudioSegment),
    Skipped { reason: String },
}

/// Synthesizes chunks one call each and stitches the audio in chunk order.
///
/// A chunk that fails, times out, comes back empty or cannot be decoded is
/// skipped. The rest of the reply is still voiced.
pub struct AudioAssembler {
    tts_repo: Arc<dyn TtsRepository>,
    concurrency: usize,
    call_timeout: Duration,
}

impl AudioAssembler {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, concurrency: usize, call_timeout: Duration) -> Self {
        Self {
            tts_repo,
            concurrency: concurrency.max(1),
            call_timeout,
        }
    }

    /// Returns `None` when no chunk produced audio, including when `chunks` is empty
    pub async fn assemble(&self, chunks: &[String], language: LanguageCode) -> Option<SynthesizedAudio> {
        if chunks.is_empty() {
            return None;
        }

        let pending: Vec<_> = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| self.synthesize_chunk(index, chunk, language))
            .collect();

        // `buffered` yields in input order regardless of completion order
        let outcomes: Vec<SegmentOutcome> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut combined = CombinedAudio::new();
        let mut skipped = 0;

        for (index, outcome) in outcomes.into_iter().enumerate() {
            let appended = match outcome {
                SegmentOutcome::Synthesized(segment) => combined
                    .append(segment)
                    .map_err(|e| e.to_string()),
                SegmentOutcome::Skipped { reason } => Err(reason),
            };

            if let Err(reason) = appended {
                skipped += 1;
                tracing::warn!(chunk_index = index, reason = %reason, "Skipping chunk audio");
            }
        }

        tracing::info!(
            chunks_requested = chunks.len(),
            segments_used = combined.segment_count(),
            chunks_skipped = skipped,
            "Chunk audio assembled"
        );

        if combined.is_empty() {
            return None;
        }

        match combined.encode_wav() {
            Ok(audio_data) => Some(SynthesizedAudio {
                audio_data,
                mime_type: WAV_MIME_TYPE,
                duration_secs: combined.duration_secs(),
                chunks_requested: chunks.len(),
                segments_used: combined.segment_count(),
            }),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode combined audio");
                None
            }
        }
    }

    async fn synthesize_chunk(&self, index: usize, chunk: &str, language: LanguageCode) -> SegmentOutcome {
        tracing::debug!(chunk_index = index, chunk_length = chunk.chars().count(), "Synthesizing chunk");

        let bytes = match tokio::time::timeout(self.call_timeout, self.tts_repo.synthesize(chunk, language)).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(reason)) => return SegmentOutcome::Skipped { reason },
            Err(_) => {
                return SegmentOutcome::Skipped {
                    reason: format!("synthesis timed out after {:?}", self.call_timeout),
                }
            }
        };

        match AudioSegment::decode(&bytes) {
            Ok(segment) => SegmentOutcome::Synthesized(segment),
            Err(AudioError::Empty) => SegmentOutcome::Skipped {
                reason: "speech endpoint returned no audio".to_string(),
            },
            Err(e) => SegmentOutcome::Skipped { reason: e.to_string() },
        }
    }
}
