use crate::error::SummarizeError;
use crate::models::{SummarizationOptions, DEFAULT_CHUNK_MAX_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub max_chars: usize,
}

impl ChunkingConfig {
    pub fn new(max_chars: usize) -> Result<Self, SummarizeError> {
        if max_chars == 0 {
            return Err(SummarizeError::InvalidArgument(
                "chunk size must be at least one character".to_string(),
            ));
        }
        Ok(Self { max_chars })
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_CHUNK_MAX_CHARS,
        }
    }
}

impl TryFrom<SummarizationOptions> for ChunkingConfig {
    type Error = SummarizeError;

    fn try_from(value: SummarizationOptions) -> Result<Self, Self::Error> {
        Self::new(value.chunk_max_chars)
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Greedily packs whitespace-separated words into chunks of at most
/// `max_chars` characters. Words are never split, so a single word longer
/// than the budget is emitted as its own chunk.
pub fn chunk_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

pub fn chunk_text(text: &str, config: ChunkingConfig) -> Vec<String> {
    chunk_words(text, config.max_chars)
}
