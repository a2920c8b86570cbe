pub mod gemini_llm_repository;
pub mod google_tts_repository;
pub mod llm_repository;
pub mod tts_repository;

pub use gemini_llm_repository::GeminiLlmRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use llm_repository::LlmRepository;
pub use tts_repository::TtsRepository;
