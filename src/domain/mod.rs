pub mod advisory;
pub mod tts;
