//! File record module
//!
//! Defines the record type parsed from the backing store.

use serde::Serialize;

/// A single file entry from the backing store.
///
/// Both fields are kept exactly as read from the source: `created_at` is
/// only interpreted as a timestamp at sort time, and `filename` is an
/// opaque label (duplicates are allowed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub filename: String,
    /// Creation timestamp as stored, e.g. `2023-01-15 09:24:31` or RFC 3339
    pub created_at: String,
}

impl FileRecord {
    pub fn new(filename: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            created_at: created_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_filename_first() {
        let record = FileRecord::new("a.txt", "2023-01-15");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"filename":"a.txt","created_at":"2023-01-15"}"#);
    }
}
