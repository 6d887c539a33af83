use std::path::Path;

use super::types::TermCounts;
use crate::error::IndexError;
use crate::search::tokenizer::normalize;

/// Reads one document and tallies its normalized tokens.
///
/// Invalid UTF-8 sequences are dropped rather than failing the read. Only
/// I/O failures (missing file, permission denied, ...) produce an error.
pub async fn index_document(path: &Path) -> Result<TermCounts, IndexError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IndexError::document_read(path, e))?;

    let text = decode_best_effort(&bytes);
    Ok(count_terms(&text))
}

/// Tallies token occurrences in already-decoded text.
pub fn count_terms(text: &str) -> TermCounts {
    let mut counts = TermCounts::new();
    for token in normalize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Decodes UTF-8, silently skipping malformed byte sequences.
///
/// Unlike `String::from_utf8_lossy` no replacement character is inserted, so
/// the valid bytes on both sides of a bad sequence end up adjacent.
pub fn decode_best_effort(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
