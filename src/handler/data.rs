//! Listing endpoint module
//!
//! Serves the file listing as JSON, sorted per the `sort` query
//! parameter.

use crate::config::AppState;
use crate::http;
use crate::listing::{self, SortMode};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Path of the listing endpoint
pub const LISTING_PATH: &str = "/api/data";

/// JSON envelope for a successful listing response
#[derive(Serialize)]
struct ListingBody {
    items: Vec<listing::FileRecord>,
}

/// Serve the file listing.
///
/// The backing store is re-read on every request, so edits to the data
/// file show up without a restart. Every loader failure maps to the same
/// opaque 500 body; the actual cause goes to the error log only.
pub async fn serve_listing(
    query: Option<&str>,
    state: &Arc<AppState>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let mode = SortMode::from_param(sort_param(query));
    let data_file = &state.config.listing.data_file;

    match listing::load_records(Path::new(data_file)).await {
        Ok(records) => {
            let items = listing::sort_records(records, mode);
            http::build_json_response(StatusCode::OK, &ListingBody { items }, is_head)
        }
        Err(err) => {
            logger::log_error(&format!("Failed to load listing from '{data_file}': {err}"));
            http::build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data")
        }
    }
}

/// Extract the raw `sort` value from a query string.
///
/// Values are matched literally with no percent-decoding; none of the
/// recognized values contain reserved characters, and anything else is
/// treated as unrecognized anyway.
fn sort_param(query: Option<&str>) -> Option<&str> {
    query?.split('&').find_map(|pair| pair.strip_prefix("sort="))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn state_with_data_file(path: &str) -> Arc<AppState> {
        let mut cfg = Config::load_from("__no_such_config_file__").unwrap();
        cfg.listing.data_file = path.to_string();
        Arc::new(AppState::new(&cfg))
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_sort_param_extraction() {
        assert_eq!(sort_param(None), None);
        assert_eq!(sort_param(Some("sort=date-asc")), Some("date-asc"));
        assert_eq!(sort_param(Some("sort=")), Some(""));
        assert_eq!(sort_param(Some("a=1&sort=filename-desc")), Some("filename-desc"));
        assert_eq!(sort_param(Some("a=1&b=2")), None);
        // Only the parameter named exactly `sort` counts
        assert_eq!(sort_param(Some("resort=date-asc")), None);
    }

    #[test]
    fn test_sort_param_is_matched_raw() {
        // No percent-decoding: an encoded mode is unrecognized and the
        // listing is served in source order
        assert_eq!(sort_param(Some("sort=date%2Dasc")), Some("date%2Dasc"));
        assert_eq!(
            SortMode::from_param(Some("date%2Dasc")),
            SortMode::Unsorted
        );
    }

    #[tokio::test]
    async fn test_listing_returns_sorted_items() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "2023-01-02 10:00:00;b.txt").unwrap();
        writeln!(file, "2023-01-01 09:00:00;a.txt").unwrap();
        let state = state_with_data_file(&file.path().to_string_lossy());

        let response = serve_listing(Some("sort=date-asc"), &state, false).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["filename"], "a.txt");
        assert_eq!(items[0]["created_at"], "2023-01-01 09:00:00");
        assert_eq!(items[1]["filename"], "b.txt");
    }

    #[tokio::test]
    async fn test_listing_default_sort_is_date_asc() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "2024-05-05;late.txt").unwrap();
        writeln!(file, "2020-05-05;early.txt").unwrap();
        let state = state_with_data_file(&file.path().to_string_lossy());

        let json = body_json(serve_listing(None, &state, false).await).await;
        assert_eq!(json["items"][0]["filename"], "early.txt");
    }

    #[tokio::test]
    async fn test_listing_unrecognized_sort_keeps_source_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "2024-05-05;late.txt").unwrap();
        writeln!(file, "2020-05-05;early.txt").unwrap();
        let state = state_with_data_file(&file.path().to_string_lossy());

        let json = body_json(serve_listing(Some("sort=bogus"), &state, false).await).await;
        assert_eq!(json["items"][0]["filename"], "late.txt");
    }

    #[tokio::test]
    async fn test_listing_missing_file_is_opaque_500() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.csv");
        let state = state_with_data_file(&missing.to_string_lossy());

        let response = serve_listing(None, &state, false).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], br#"{"error":"Failed to fetch data"}"#);
    }

    #[tokio::test]
    async fn test_listing_malformed_line_is_opaque_500() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "2023-01-01;ok.txt").unwrap();
        writeln!(file, "2023-01-02;two;fields;too;many").unwrap();
        let state = state_with_data_file(&file.path().to_string_lossy());

        let response = serve_listing(None, &state, false).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_listing_empty_file_is_empty_items() {
        let file = NamedTempFile::new().unwrap();
        let state = state_with_data_file(&file.path().to_string_lossy());

        let json = body_json(serve_listing(None, &state, false).await).await;
        assert_eq!(json["items"].as_array().unwrap().len(), 0);
    }
}
