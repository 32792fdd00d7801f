//! Record loader module
//!
//! Reads the semicolon-delimited backing store and parses it into
//! `FileRecord`s. A malformed line fails the whole batch; there is no
//! partial-result recovery.

use std::path::Path;

use super::record::FileRecord;

/// Errors raised while loading the backing store.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// Backing store could not be read (missing file, permissions, ...)
    #[error("failed to read backing store: {0}")]
    Io(#[from] std::io::Error),
    /// The reader rejected the input (invalid UTF-8 and similar)
    #[error("failed to parse backing store: {0}")]
    Csv(#[from] csv::Error),
    /// A line did not have exactly two `;`-separated fields
    #[error("malformed record on line {line}: expected 2 fields, found {fields}")]
    MalformedLine { line: u64, fields: usize },
}

/// Parse raw backing-store text into records, preserving line order.
///
/// Each line holds exactly two `;`-separated fields, `created_at;filename`.
/// There is no header row (the first line is data) and no quoting: every
/// byte between delimiters belongs to the field. Empty lines are skipped.
pub fn parse_records(text: &str) -> Result<Vec<FileRecord>, ListingError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .quoting(false)
        // Width is validated per record below so a bad line reports its
        // own field count instead of a generic reader error.
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != 2 {
            // The reader's own line counter ignores the blank lines it
            // skips, so derive the physical line from the byte offset.
            let line = record.position().map_or_else(
                || u64::try_from(index + 1).unwrap_or(u64::MAX),
                |pos| physical_line(text, pos.byte()),
            );
            return Err(ListingError::MalformedLine {
                line,
                fields: record.len(),
            });
        }
        records.push(FileRecord::new(&record[1], &record[0]));
    }

    Ok(records)
}

/// 1-based source line containing `byte_offset`, counting every newline
/// including those of blank lines.
fn physical_line(text: &str, byte_offset: u64) -> u64 {
    let prefix = usize::try_from(byte_offset).map_or(text.len(), |n| n.min(text.len()));
    let newlines = text.as_bytes()[..prefix]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    u64::try_from(newlines).unwrap_or(u64::MAX - 1) + 1
}

/// Read and parse the backing store at `path`.
///
/// The file is re-read on every call; callers decide how failures map to
/// their own error surface.
pub async fn load_records(path: &Path) -> Result<Vec<FileRecord>, ListingError> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_records(&text)
}
