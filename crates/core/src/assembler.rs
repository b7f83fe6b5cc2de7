use crate::chunking::word_count;
use crate::models::FinalSummary;

/// Joins per-chunk summaries in chunk order and records word counts for the
/// source and the result.
pub fn assemble<S: AsRef<str>>(summaries: &[S], source_text: &str) -> FinalSummary {
    let text = summaries
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");

    FinalSummary {
        source_word_count: word_count(source_text),
        summary_word_count: word_count(&text),
        chunk_count: summaries.len(),
        text,
    }
}
