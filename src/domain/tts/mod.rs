pub mod assembler;
pub mod audio;
pub mod chunker;
pub mod language;
pub mod service;

pub use assembler::{AudioAssembler, SynthesizedAudio};
pub use chunker::{TextChunker, DEFAULT_MAX_CHUNK_LENGTH};
pub use language::LanguageCode;
pub use service::{TtsService, TtsServiceApi};
