use serde::{Deserialize, Serialize};

/// Languages a farmer can select for the answer and its spoken audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LanguageCode {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "te")]
    Telugu,
}

impl LanguageCode {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Hindi => "hi",
            LanguageCode::Telugu => "te",
        }
    }

    /// Language name as written into the model prompt
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Hindi => "Hindi",
            LanguageCode::Telugu => "Telugu",
        }
    }

    /// Code understood by the speech endpoint's `tl` parameter
    pub fn tts_code(&self) -> &'static str {
        self.as_str()
    }

    /// Resolve a client-supplied selector, falling back to English
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "hi" => LanguageCode::Hindi,
            "te" => LanguageCode::Telugu,
            "en" => LanguageCode::English,
            other => {
                if !other.is_empty() {
                    tracing::debug!(selector = other, "Unknown language selector, using English");
                }
                LanguageCode::default()
            }
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
