use crate::error::SummarizeError;
use crate::models::{Format, SourceDocument};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use lopdf::Document;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

pub trait PdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, SummarizeError>;
}

#[derive(Default)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, SummarizeError> {
        let document = Document::load_mem(bytes)
            .map_err(|error| SummarizeError::CorruptDocument(format!("pdf: {error}")))?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages() {
            let text = document.extract_text(&[page_no]).map_err(|error| {
                SummarizeError::CorruptDocument(format!("pdf page {page_no}: {error}"))
            })?;
            pages.push(PageText {
                number: page_no,
                text,
            });
        }

        Ok(pages)
    }
}

/// Converts the raw bytes of a document into one string. Fails with
/// [`SummarizeError::EmptyDocument`] when nothing but whitespace is left.
pub fn extract_text(bytes: &[u8], format: Format) -> Result<String, SummarizeError> {
    let text = match format {
        Format::Text => decode_utf8(bytes)?,
        Format::WordDocument => extract_docx_text(bytes)?,
        Format::Pdf => extract_pdf_text(bytes, &LopdfExtractor)?,
    };

    if text.trim().is_empty() {
        return Err(SummarizeError::EmptyDocument);
    }

    debug!(%format, chars = text.chars().count(), "extracted document text");
    Ok(text)
}

pub fn extract_document(document: &SourceDocument) -> Result<String, SummarizeError> {
    extract_text(&document.bytes, document.format)
}

fn decode_utf8(bytes: &[u8]) -> Result<String, SummarizeError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|error| SummarizeError::Encoding {
            valid_up_to: error.valid_up_to(),
        })
}

pub fn extract_pdf_text(
    bytes: &[u8],
    extractor: &impl PdfExtractor,
) -> Result<String, SummarizeError> {
    let pages = extractor.extract_pages(bytes)?;
    debug!(page_count = pages.len(), "pdf pages extracted");
    Ok(pages.into_iter().map(|page| page.text).collect())
}

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, SummarizeError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|error| SummarizeError::CorruptDocument(format!("docx: {error:?}")))?;

    let paragraphs = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect::<Vec<_>>();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

fn push_children_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(text) => out.push_str(&text.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, out),
            _ => {}
        }
    }
}
