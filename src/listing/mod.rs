//! File listing core
//!
//! The logic behind the listing endpoint: a loader that parses the
//! semicolon-delimited backing store into records, and the sort modes
//! applied before the records are serialized out.

mod loader;
mod record;
mod sort;

pub use loader::{load_records, parse_records, ListingError};
pub use record::FileRecord;
pub use sort::{natural_cmp, sort_records, SortMode};
