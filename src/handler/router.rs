//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, and access logging.

use crate::config::AppState;
use crate::handler::{data, page};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let response = route_request(&req, &state).await;

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and configuration.
///
/// Generic over the request body: routing only ever looks at the head of
/// the request.
async fn route_request<B>(req: &Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let method = req.method();
    let path = req.uri().path();

    // 1. Check HTTP method
    if let Some(response) = check_http_method(method, state.config.http.enable_cors) {
        return response;
    }

    // 2. Check body size
    if let Some(response) = check_body_size(req, state.config.http.max_body_size) {
        return response;
    }

    // 3. Log headers if enabled
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let ctx = RequestContext {
        path,
        is_head: *method == Method::HEAD,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    let routes = &state.config.routes;

    // 4. Health check endpoints (highest priority, always fast)
    if routes.health.enabled {
        if ctx.path == routes.health.liveness_path {
            return http::build_health_response(true);
        }
        if ctx.path == routes.health.readiness_path {
            // Ready only when the backing store is actually there to read
            let ready = tokio::fs::metadata(&state.config.listing.data_file)
                .await
                .is_ok();
            return http::build_health_response(ready);
        }
    }

    // 5. Favicon routes
    if routes.favicon_paths.iter().any(|p| ctx.path == p) {
        return page::serve_favicon(&ctx).await;
    }

    // 6. Listing endpoint
    if ctx.path == data::LISTING_PATH {
        return data::serve_listing(req.uri().query(), state, ctx.is_head).await;
    }

    // 7. Listing page
    if ctx.path == "/" {
        return page::serve_index(&ctx);
    }

    http::build_404_response()
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Fill an access log entry from the finished request/response pair
fn access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> logger::AccessLogEntry {
    let mut entry = logger::AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header_value(req, "referer");
    entry.user_agent = header_value(req, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else if version == Version::HTTP_09 {
        "0.9"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_state() -> Arc<AppState> {
        let cfg = Config::load_from("__no_such_config_file__").unwrap();
        Arc::new(AppState::new(&cfg))
    }

    fn get(path: &str) -> Request<()> {
        Request::builder().uri(path).body(()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_paths_are_404() {
        let state = test_state();
        assert_eq!(route_request(&get("/no-such-page"), &state).await.status(), 404);
        assert_eq!(route_request(&get("/api"), &state).await.status(), 404);
    }

    #[tokio::test]
    async fn test_root_serves_the_page() {
        let state = test_state();
        let response = route_request(&get("/"), &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["Content-Type"],
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_liveness_probe_responds() {
        let state = test_state();
        let response = route_request(&get("/healthz"), &state).await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_post_is_rejected_before_routing() {
        let state = test_state();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/data")
            .body(())
            .unwrap();
        let response = route_request(&request, &state).await;
        assert_eq!(response.status(), 405);
    }

    #[test]
    fn test_non_get_methods_are_rejected() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());

        let options = check_http_method(&Method::OPTIONS, false).unwrap();
        assert_eq!(options.status(), 204);

        let post = check_http_method(&Method::POST, false).unwrap();
        assert_eq!(post.status(), 405);
        assert_eq!(post.headers()["Allow"], "GET, HEAD, OPTIONS");

        let delete = check_http_method(&Method::DELETE, false).unwrap();
        assert_eq!(delete.status(), 405);
    }

    #[test]
    fn test_http_version_label() {
        assert_eq!(http_version_label(Version::HTTP_11), "1.1");
        assert_eq!(http_version_label(Version::HTTP_10), "1.0");
        assert_eq!(http_version_label(Version::HTTP_2), "2");
    }
}
