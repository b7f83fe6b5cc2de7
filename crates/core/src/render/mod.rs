pub mod docx;
pub mod layout;
pub mod metrics;
pub mod pdf;

use crate::error::SummarizeError;
use crate::models::{Format, RenderedArtifact, RenderedArtifacts};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use layout::{layout_pages, PageLayout, PageSettings, PlacedLine};

pub fn render_text(summary: &str) -> Vec<u8> {
    summary.as_bytes().to_vec()
}

/// Renders all three artifacts. Any single failure fails the whole call.
pub fn render_all(summary: &str) -> Result<RenderedArtifacts, SummarizeError> {
    render_all_with(summary, &PageSettings::default())
}

pub fn render_all_with(
    summary: &str,
    settings: &PageSettings,
) -> Result<RenderedArtifacts, SummarizeError> {
    let text = RenderedArtifact::new(Format::Text, render_text(summary));
    let word_document = RenderedArtifact::new(Format::WordDocument, docx::render_docx(summary)?);
    let pdf = RenderedArtifact::new(Format::Pdf, pdf::render_pdf(summary, settings)?);

    debug!(
        text_bytes = text.bytes.len(),
        docx_bytes = word_document.bytes.len(),
        pdf_bytes = pdf.bytes.len(),
        "rendered summary artifacts"
    );

    Ok(RenderedArtifacts {
        text,
        word_document,
        pdf,
    })
}

impl RenderedArtifacts {
    /// Writes each artifact under its suggested file name.
    pub async fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, SummarizeError> {
        tokio::fs::create_dir_all(dir).await?;

        let mut written = Vec::new();
        for artifact in self.iter() {
            let path = dir.join(artifact.file_name);
            tokio::fs::write(&path, &artifact.bytes).await?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn text_artifact_is_byte_exact() {
        let summary = "Résumé: costs fell — “sharply”.\nSecond line.";
        let artifacts = render_all(summary).unwrap();

        assert_eq!(String::from_utf8(artifacts.text.bytes.clone()).unwrap(), summary);
        assert_eq!(artifacts.text.mime, "text/plain");
        assert_eq!(artifacts.pdf.mime, "application/pdf");
        assert_eq!(artifacts.get(Format::Pdf).file_name, "Summary.pdf");
    }

    #[test]
    fn empty_summary_still_renders() {
        let artifacts = render_all("").unwrap();
        assert!(artifacts.text.bytes.is_empty());
        assert!(!artifacts.word_document.bytes.is_empty());
        assert!(!artifacts.pdf.bytes.is_empty());
    }

    #[tokio::test]
    async fn artifacts_are_written_with_suggested_names() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let artifacts = render_all("Saved summary.")?;

        let written = artifacts.write_to_dir(dir.path()).await?;
        let names: Vec<_> = written
            .iter()
            .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
            .collect();
        assert_eq!(names, vec!["Summary.txt", "Summary.docx", "Summary.pdf"]);
        assert_eq!(std::fs::read_to_string(dir.path().join("Summary.txt"))?, "Saved summary.");
        Ok(())
    }
}
