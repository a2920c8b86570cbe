use regex::Regex;

/// Empirical ceiling that keeps requests under the speech endpoint's
/// undocumented per-request length limit
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 180;

/// Splits model replies into chunks the speech endpoint can voice whole.
///
/// Chunks follow sentence boundaries (`.`, `!`, `?` followed by whitespace).
/// A sentence longer than the limit is re-packed from its comma-delimited
/// clauses. A single clause longer than the limit is emitted as-is.
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chunk_length: usize,
    sentence_boundary: Regex,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_LENGTH)
    }
}

impl TextChunker {
    pub fn new(max_chunk_length: usize) -> Self {
        Self {
            max_chunk_length: max_chunk_length.max(1),
            sentence_boundary: Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"),
        }
    }

    pub fn max_chunk_length(&self) -> usize {
        self.max_chunk_length
    }

    /// Split `text` into ordered, trimmed, non-empty chunks
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();

        for sentence in self.split_sentences(text) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            if char_len(sentence) <= self.max_chunk_length {
                chunks.push(sentence.to_string());
            } else {
                self.pack_clauses(sentence, &mut chunks);
            }
        }

        chunks
    }

    /// Sentence slices in order; terminal punctuation stays attached
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in self.sentence_boundary.find_iter(text) {
            // [.!?] is a single byte
            let end = boundary.start() + 1;
            sentences.push(&text[start..end]);
            start = boundary.end();
        }
        sentences.push(&text[start..]);

        sentences
    }

    /// Greedily pack comma-delimited clauses of an oversized sentence
    fn pack_clauses(&self, sentence: &str, chunks: &mut Vec<String>) {
        let parts: Vec<&str> = sentence.split(',').collect();
        let last = parts.len() - 1;

        let mut buffer = String::new();
        let mut buffer_len = 0;

        for (index, part) in parts.iter().enumerate() {
            let keeps_comma = index < last;
            let part_len = char_len(part) + usize::from(keeps_comma);

            if buffer_len + part_len > self.max_chunk_length {
                push_trimmed(&buffer, chunks);
                buffer.clear();
                buffer_len = 0;
            }

            buffer.push_str(part);
            if keeps_comma {
                buffer.push(',');
            }
            buffer_len += part_len;
        }

        push_trimmed(&buffer, chunks);
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn push_trimmed(buffer: &str, chunks: &mut Vec<String>) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
