use crate::error::SummarizeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CHUNK_MAX_CHARS: usize = 1_000;
pub const DEFAULT_MIN_LENGTH: u32 = 50;
pub const DEFAULT_MAX_LENGTH: u32 = 150;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Format {
    Text,
    WordDocument,
    Pdf,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, SummarizeError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                SummarizeError::UnsupportedFormat(format!(
                    "path has no extension: {}",
                    path.display()
                ))
            })?;
        extension.parse()
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::WordDocument => "docx",
            Format::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Text => "text/plain",
            Format::WordDocument => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Format::Pdf => "application/pdf",
        }
    }

    pub fn summary_file_name(self) -> &'static str {
        match self {
            Format::Text => "Summary.txt",
            Format::WordDocument => "Summary.docx",
            Format::Pdf => "Summary.pdf",
        }
    }
}

impl FromStr for Format {
    type Err = SummarizeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "txt" | "text" => Ok(Format::Text),
            "docx" => Ok(Format::WordDocument),
            "pdf" => Ok(Format::Pdf),
            _ => Err(SummarizeError::UnsupportedFormat(tag.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An uploaded document, immutable once received.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub bytes: Vec<u8>,
    pub format: Format,
    pub checksum: String,
    pub received_at: DateTime<Utc>,
}

impl SourceDocument {
    pub fn new(bytes: Vec<u8>, format: Format) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Self {
            checksum: format!("{:x}", hasher.finalize()),
            bytes,
            format,
            received_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_length: u32,
    pub max_length: u32,
}

impl LengthBounds {
    pub fn new(min_length: u32, max_length: u32) -> Result<Self, SummarizeError> {
        let bounds = Self {
            min_length,
            max_length,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), SummarizeError> {
        if self.min_length > self.max_length {
            return Err(SummarizeError::InvalidLengthBounds {
                min_length: self.min_length,
                max_length: self.max_length,
            });
        }
        Ok(())
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummarizationOptions {
    pub chunk_max_chars: usize,
    pub bounds: LengthBounds,
}

impl Default for SummarizationOptions {
    fn default() -> Self {
        Self {
            chunk_max_chars: DEFAULT_CHUNK_MAX_CHARS,
            bounds: LengthBounds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalSummary {
    pub text: String,
    pub source_word_count: usize,
    pub summary_word_count: usize,
    pub chunk_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub format: Format,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub file_name: &'static str,
}

impl RenderedArtifact {
    pub fn new(format: Format, bytes: Vec<u8>) -> Self {
        Self {
            format,
            bytes,
            mime: format.mime_type(),
            file_name: format.summary_file_name(),
        }
    }
}

/// The three encodings of one summary. Produced together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub text: RenderedArtifact,
    pub word_document: RenderedArtifact,
    pub pdf: RenderedArtifact,
}

impl RenderedArtifacts {
    pub fn get(&self, format: Format) -> &RenderedArtifact {
        match format {
            Format::Text => &self.text,
            Format::WordDocument => &self.word_document,
            Format::Pdf => &self.pdf,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedArtifact> {
        [&self.text, &self.word_document, &self.pdf].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tags_resolve_case_insensitively() {
        assert_eq!("TXT".parse::<Format>().unwrap(), Format::Text);
        assert_eq!(".docx".parse::<Format>().unwrap(), Format::WordDocument);
        assert_eq!("Pdf".parse::<Format>().unwrap(), Format::Pdf);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let error = "odt".parse::<Format>().unwrap_err();
        assert!(matches!(error, SummarizeError::UnsupportedFormat(tag) if tag == "odt"));

        let error = Format::from_path(Path::new("notes")).unwrap_err();
        assert!(matches!(error, SummarizeError::UnsupportedFormat(_)));
    }

    #[test]
    fn format_from_path_uses_extension() {
        assert_eq!(
            Format::from_path(Path::new("/tmp/Report.PDF")).unwrap(),
            Format::Pdf
        );
        assert_eq!(
            Format::from_path(Path::new("minutes.docx")).unwrap(),
            Format::WordDocument
        );
    }

    #[test]
    fn length_bounds_reject_min_above_max() {
        assert!(LengthBounds::new(50, 50).is_ok());
        let error = LengthBounds::new(100, 60).unwrap_err();
        assert!(matches!(
            error,
            SummarizeError::InvalidLengthBounds {
                min_length: 100,
                max_length: 60
            }
        ));
    }

    #[test]
    fn source_checksum_is_reproducible() {
        let first = SourceDocument::new(b"abc".to_vec(), Format::Text);
        let second = SourceDocument::new(b"abc".to_vec(), Format::Text);
        assert_eq!(first.checksum, second.checksum);
        assert_eq!(first.checksum.len(), 64);
    }

    #[test]
    fn artifacts_carry_fixed_names_and_mime_types() {
        let artifact = RenderedArtifact::new(Format::WordDocument, Vec::new());
        assert_eq!(artifact.file_name, "Summary.docx");
        assert_eq!(
            artifact.mime,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }
}
