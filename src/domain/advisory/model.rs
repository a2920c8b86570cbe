use crate::domain::tts::{LanguageCode, SynthesizedAudio};

/// Image bytes forwarded to the model together with the prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

impl ImageAttachment {
    /// Build an attachment, sniffing the mime type from the magic bytes.
    /// Returns `None` for anything that is not JPEG, PNG, GIF or WEBP.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let mime_type = sniff_image_mime(&data)?;
        Some(Self { mime_type, data })
    }
}

fn sniff_image_mime(data: &[u8]) -> Option<&'static str> {
    match data {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

/// One farmer query as received from the client
#[derive(Debug, Clone, Default)]
pub struct AdvisoryQuery {
    pub text: String,
    pub image: Option<ImageAttachment>,
    pub language: LanguageCode,
}

/// Generated advice plus its spoken version, if any chunk could be voiced
#[derive(Debug, Clone)]
pub struct AdvisoryAnswer {
    pub analysis: String,
    pub audio: Option<SynthesizedAudio>,
}
