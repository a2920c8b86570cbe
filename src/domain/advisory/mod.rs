pub mod error;
pub mod model;
pub mod prompt;
pub mod service;

pub use error::AdvisoryServiceError;
pub use model::{AdvisoryAnswer, AdvisoryQuery, ImageAttachment};
pub use service::{AdvisoryService, AdvisoryServiceApi, EMPTY_QUERY_MESSAGE};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Response for POST /predict
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub analysis: String,
    /// Base64 audio, or `null` when no chunk could be voiced
    #[serde(rename = "audioContent")]
    pub audio_content: Option<String>,
    #[serde(rename = "audioMimeType", skip_serializing_if = "Option::is_none", default)]
    pub audio_mime_type: Option<String>,
}

impl From<AdvisoryAnswer> for PredictResponse {
    fn from(answer: AdvisoryAnswer) -> Self {
        let (audio_content, audio_mime_type) = match answer.audio {
            Some(audio) => (
                Some(STANDARD.encode(&audio.audio_data)),
                Some(audio.mime_type.to_string()),
            ),
            None => (None, None),
        };

        Self {
            analysis: answer.analysis,
            audio_content,
            audio_mime_type,
        }
    }
}
