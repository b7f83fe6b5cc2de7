use crate::assembler::assemble;
use crate::chunking::{chunk_text, ChunkingConfig};
use crate::error::SummarizeError;
use crate::extractor::extract_document;
use crate::models::{
    FinalSummary, Format, RenderedArtifacts, SourceDocument, SummarizationOptions,
};
use crate::render::{render_all_with, PageSettings};
use crate::summarizer::Summarizer;
use tracing::{debug, info};

/// Everything one pipeline run produces for a document.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub checksum: String,
    pub format: Format,
    pub options: SummarizationOptions,
    pub extracted_text: String,
    pub summary: FinalSummary,
    pub artifacts: RenderedArtifacts,
}

/// Runs extraction, chunking, per-chunk summarization, assembly and
/// rendering strictly in sequence. Holds no state between runs.
pub struct SummaryPipeline<S>
where
    S: Summarizer,
{
    summarizer: S,
    options: SummarizationOptions,
    page_settings: PageSettings,
}

impl<S> SummaryPipeline<S>
where
    S: Summarizer + Send + Sync,
{
    pub fn new(summarizer: S, options: SummarizationOptions) -> Self {
        Self {
            summarizer,
            options,
            page_settings: PageSettings::default(),
        }
    }

    pub fn with_page_settings(mut self, page_settings: PageSettings) -> Self {
        self.page_settings = page_settings;
        self
    }

    pub fn options(&self) -> &SummarizationOptions {
        &self.options
    }

    pub fn summarizer(&self) -> &S {
        &self.summarizer
    }

    /// Summarizes extracted text. `progress` receives `completed / total`
    /// after every chunk. The first failing chunk aborts the run and the
    /// summaries gathered so far are dropped.
    pub async fn summarize_text<F>(
        &self,
        text: &str,
        mut progress: F,
    ) -> Result<FinalSummary, SummarizeError>
    where
        F: FnMut(f32) + Send,
    {
        let bounds = self.options.bounds;
        bounds.validate()?;
        let config = ChunkingConfig::try_from(self.options)?;

        let chunks = chunk_text(text, config);
        let total = chunks.len();
        info!(chunk_count = total, max_chars = config.max_chars, "summarizing document");

        let mut summaries = Vec::with_capacity(total);
        for (index, chunk) in chunks.iter().enumerate() {
            let summary = self
                .summarizer
                .summarize(chunk, bounds.min_length, bounds.max_length)
                .await
                .map_err(|error| SummarizeError::SummarizationFailed {
                    chunk: index + 1,
                    total,
                    details: error.to_string(),
                })?;

            debug!(
                chunk = index + 1,
                total,
                summary_chars = summary.chars().count(),
                "chunk summarized"
            );
            summaries.push(summary);
            progress((index + 1) as f32 / total as f32);
        }

        Ok(assemble(&summaries, text))
    }

    pub async fn run<F>(
        &self,
        document: &SourceDocument,
        progress: F,
    ) -> Result<PipelineOutput, SummarizeError>
    where
        F: FnMut(f32) + Send,
    {
        self.options.bounds.validate()?;

        let extracted_text = extract_document(document)?;
        let summary = self.summarize_text(&extracted_text, progress).await?;
        let artifacts = render_all_with(&summary.text, &self.page_settings)?;

        info!(
            format = %document.format,
            checksum = %document.checksum,
            source_words = summary.source_word_count,
            summary_words = summary.summary_word_count,
            "document summarized"
        );

        Ok(PipelineOutput {
            checksum: document.checksum.clone(),
            format: document.format,
            options: self.options,
            extracted_text,
            summary,
            artifacts,
        })
    }
}
