use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("corrupt document: {0}")]
    CorruptDocument(String),

    #[error("text is not valid utf-8 (first invalid byte at offset {valid_up_to})")]
    Encoding { valid_up_to: usize },

    #[error("document contains no text")]
    EmptyDocument,

    #[error("invalid length bounds: min_length {min_length} exceeds max_length {max_length}")]
    InvalidLengthBounds { min_length: u32, max_length: u32 },

    #[error("summarization failed on chunk {chunk} of {total}: {details}")]
    SummarizationFailed {
        chunk: usize,
        total: usize,
        details: String,
    },

    #[error("render failed for {format}: {details}")]
    RenderFailed { format: String, details: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SummarizeError {
    pub(crate) fn render(format: impl Into<String>, details: impl ToString) -> Self {
        Self::RenderFailed {
            format: format.into(),
            details: details.to_string(),
        }
    }
}

pub type Result<T, E = SummarizeError> = std::result::Result<T, E>;

/// Failures raised by a [`crate::Summarizer`] implementation. The pipeline
/// folds every one of these into [`SummarizeError::SummarizationFailed`].
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("summarization request failed: {0}")]
    Request(String),
}
