//! Listing sort module
//!
//! The orderings behind the `sort` query parameter: timestamp order with
//! unparseable values pushed to the end, and natural (numeric-aware)
//! filename order.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::record::FileRecord;

/// Requested ordering for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Ascending by `created_at`; unparseable timestamps sort last
    DateAsc,
    /// Natural ascending by filename
    FilenameAsc,
    /// Exact pairwise inverse of `FilenameAsc`
    FilenameDesc,
    /// Keep source parse order
    Unsorted,
}

impl SortMode {
    /// Map the raw `sort` query parameter to a mode.
    ///
    /// A missing or empty parameter defaults to `DateAsc`. Any other
    /// unrecognized value is served unsorted rather than rejected, so
    /// clients probing with bogus values still get the full listing.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("" | "date-asc") => Self::DateAsc,
            Some("filename-asc") => Self::FilenameAsc,
            Some("filename-desc") => Self::FilenameDesc,
            Some(_) => Self::Unsorted,
        }
    }
}

/// Reorder records per `mode`, consuming and returning the batch.
///
/// The output is always a permutation of the input; sorting never drops,
/// duplicates, or fails a record.
pub fn sort_records(mut records: Vec<FileRecord>, mode: SortMode) -> Vec<FileRecord> {
    match mode {
        SortMode::DateAsc => {
            // Parse each timestamp once; the leading bool sends `None`
            // keys behind every parseable one.
            records.sort_by_cached_key(|r| {
                let parsed = parse_created_at(&r.created_at);
                (parsed.is_none(), parsed)
            });
        }
        SortMode::FilenameAsc => {
            records.sort_by(|a, b| natural_cmp(&a.filename, &b.filename));
        }
        SortMode::FilenameDesc => {
            // Inverted comparator rather than a reversed ascending sort:
            // the two differ in how they place equal-comparing names.
            records.sort_by(|a, b| natural_cmp(&b.filename, &a.filename));
        }
        SortMode::Unsorted => {}
    }
    records
}

/// Interpret a stored `created_at` value as a timestamp.
///
/// Accepts RFC 3339 (offsets normalized to UTC), `YYYY-MM-DD HH:MM:SS`,
/// or a bare `YYYY-MM-DD` taken as midnight. `None` means the value is
/// not a timestamp in any accepted shape; ordering then degrades instead
/// of failing the request.
fn parse_created_at(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Natural-order string comparison: contiguous ASCII digit runs compare
/// by numeric value, everything else compares case-insensitively.
///
/// Under these rules `file2` orders before `file10`. Names equal under
/// them (`file1` vs `file01`, case variants) fall back to plain byte
/// order so the result is a total order, never an unstable "equal".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut lhs = a.chars().peekable();
    let mut rhs = b.chars().peekable();

    loop {
        match (lhs.peek().copied(), rhs.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let run_a = take_digit_run(&mut lhs);
                let run_b = take_digit_run(&mut rhs);
                match cmp_digit_runs(&run_a, &run_b) {
                    Ordering::Equal => {}
                    decided => return decided,
                }
            }
            (Some(x), Some(y)) => match x.to_lowercase().cmp(y.to_lowercase()) {
                Ordering::Equal => {
                    lhs.next();
                    rhs.next();
                }
                decided => return decided,
            },
        }
    }

    a.cmp(b)
}

fn take_digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

/// Compare two digit runs by numeric value without parsing them into a
/// fixed-width integer, so arbitrarily long runs cannot overflow.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
