use crate::error::SummarizeError;
use crate::models::{Format, RenderedArtifact, SourceDocument};
use crate::orchestrator::{PipelineOutput, SummaryPipeline};
use crate::summarizer::Summarizer;
use tracing::info;

/// Per-user state kept by the caller between interactions: the last
/// processed document's output and whether a download was just taken.
#[derive(Debug, Default)]
pub struct SummarySession {
    output: Option<PipelineOutput>,
    download_notice: Option<Format>,
}

impl SummarySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes `document` unless the cached output came from the same
    /// bytes, format and options, in which case it is returned without
    /// calling the model.
    pub async fn process<S, F>(
        &mut self,
        pipeline: &SummaryPipeline<S>,
        document: &SourceDocument,
        progress: F,
    ) -> Result<&PipelineOutput, SummarizeError>
    where
        S: Summarizer + Send + Sync,
        F: FnMut(f32) + Send,
    {
        let cached = self.output.as_ref().is_some_and(|output| {
            output.checksum == document.checksum
                && output.format == document.format
                && output.options == *pipeline.options()
        });

        if cached {
            info!(checksum = %document.checksum, "reusing cached summary");
        } else {
            self.reset();
            self.output = Some(pipeline.run(document, progress).await?);
        }

        self.output
            .as_ref()
            .ok_or_else(|| SummarizeError::InvalidArgument("session has no output".to_string()))
    }

    pub fn output(&self) -> Option<&PipelineOutput> {
        self.output.as_ref()
    }

    pub fn artifact(&self, format: Format) -> Option<&RenderedArtifact> {
        self.output
            .as_ref()
            .map(|output| output.artifacts.get(format))
    }

    pub fn mark_downloaded(&mut self, format: Format) {
        if self.output.is_some() {
            self.download_notice = Some(format);
        }
    }

    /// Returns the pending download notification and clears it.
    pub fn take_download_notice(&mut self) -> Option<Format> {
        self.download_notice.take()
    }

    pub fn reset(&mut self) {
        self.output = None;
        self.download_notice = None;
    }
}
