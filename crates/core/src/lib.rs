pub mod assembler;
pub mod chunking;
pub mod error;
pub mod extractor;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod session;
pub mod summarizer;

pub use assembler::assemble;
pub use chunking::{chunk_text, chunk_words, word_count, ChunkingConfig};
pub use error::{SummarizeError, SummarizerError};
pub use extractor::{extract_document, extract_text, LopdfExtractor, PageText, PdfExtractor};
pub use models::{
    FinalSummary, Format, LengthBounds, RenderedArtifact, RenderedArtifacts, SourceDocument,
    SummarizationOptions, DEFAULT_CHUNK_MAX_CHARS, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
};
pub use orchestrator::{PipelineOutput, SummaryPipeline};
pub use render::{layout_pages, render_all, render_all_with, PageLayout, PageSettings, PlacedLine};
pub use session::SummarySession;
pub use summarizer::{HttpSummarizer, HttpSummarizerConfig, Summarizer, DEFAULT_TIMEOUT_SECS};
