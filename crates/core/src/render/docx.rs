use crate::error::SummarizeError;
use docx_rs::{BreakType, Docx, Paragraph, Run};
use std::io::Cursor;

/// Packs `summary` into a DOCX with a single paragraph. Embedded newlines
/// become line breaks inside that paragraph.
pub fn render_docx(summary: &str) -> Result<Vec<u8>, SummarizeError> {
    let mut run = Run::new();
    for (index, segment) in summary.split('\n').enumerate() {
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(segment.trim_end_matches('\r'));
    }

    let mut cursor = Cursor::new(Vec::new());
    Docx::new()
        .add_paragraph(Paragraph::new().add_run(run))
        .build()
        .pack(&mut cursor)
        .map_err(|error| SummarizeError::render("docx", format!("{error:?}")))?;

    Ok(cursor.into_inner())
}
