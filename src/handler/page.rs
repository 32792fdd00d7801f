//! Browser page module
//!
//! Serves the embedded listing page and the bundled favicon.

use crate::handler::router::RequestContext;
use crate::http::{self, cache};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

const FAVICON_PATH: &str = "static/favicon.svg";

/// Serve the embedded listing page
pub fn serve_index(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    http::build_html_response(INDEX_HTML, ctx.is_head)
}

/// Serve favicon with ETag revalidation
pub async fn serve_favicon(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    match load_favicon().await {
        Some(data) => {
            let etag = cache::generate_etag(&data);
            if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
                return http::build_304_response(&etag);
            }
            http::build_cached_response(Bytes::from(data), "image/svg+xml", &etag, ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

async fn load_favicon() -> Option<Vec<u8>> {
    fs::read(FAVICON_PATH).await.ok()
}

/// Listing page markup: a static shell plus the fetch/render script.
/// Sort buttons re-request the listing; the table renders whatever the
/// endpoint returns, so the page never re-sorts on its own.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Files</title>
    <link rel="icon" type="image/svg+xml" href="/favicon.svg">
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: #f3f4f6;
            color: #111827;
            line-height: 1.5;
        }
        .wrap {
            max-width: 960px;
            margin: 0 auto;
            padding: 40px 24px;
        }
        header {
            display: flex;
            flex-wrap: wrap;
            align-items: flex-end;
            justify-content: space-between;
            gap: 16px;
        }
        h1 {
            font-size: 1.25em;
            font-weight: 600;
        }
        .subtitle {
            margin-top: 4px;
            font-size: 0.9em;
            color: #4b5563;
        }
        .sort-group button {
            padding: 8px 16px;
            font-size: 0.875em;
            font-weight: 500;
            background: #ffffff;
            color: #374151;
            border: 1px solid #d1d5db;
            cursor: pointer;
        }
        .sort-group button:first-child {
            border-radius: 6px 0 0 6px;
        }
        .sort-group button:last-child {
            border-radius: 0 6px 6px 0;
        }
        .sort-group button + button {
            border-left: none;
        }
        .sort-group button.active {
            background: #4f46e5;
            border-color: #4f46e5;
            color: #ffffff;
        }
        #status {
            margin-top: 32px;
            color: #4b5563;
        }
        #status.error {
            color: #dc2626;
        }
        table {
            width: 100%;
            margin-top: 32px;
            border-collapse: collapse;
            background: #ffffff;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
        }
        th, td {
            padding: 12px 24px;
            text-align: left;
            font-size: 0.875em;
        }
        thead {
            background: #f9fafb;
        }
        th {
            font-weight: 600;
        }
        tbody tr {
            border-top: 1px solid #e5e7eb;
        }
        td.date {
            color: #6b7280;
        }
    </style>
</head>
<body>
    <div class="wrap">
        <header>
            <div>
                <h1>Files</h1>
                <p class="subtitle">A list of all files with their creation dates.</p>
            </div>
            <div class="sort-group" id="sort-buttons">
                <button data-sort="date-asc" class="active">Date (Ascending)</button>
                <button data-sort="filename-asc">Filename (Ascending)</button>
                <button data-sort="filename-desc">Filename (Descending)</button>
            </div>
        </header>
        <div id="status">Loading...</div>
        <table id="files" hidden>
            <thead>
                <tr>
                    <th>Filename</th>
                    <th>Created At</th>
                </tr>
            </thead>
            <tbody></tbody>
        </table>
    </div>
    <script>
        const statusEl = document.getElementById('status');
        const table = document.getElementById('files');
        const tbody = table.querySelector('tbody');
        const buttons = document.querySelectorAll('#sort-buttons button');

        async function fetchData(sort) {
            statusEl.textContent = 'Loading...';
            statusEl.classList.remove('error');
            statusEl.hidden = false;
            table.hidden = true;
            try {
                const response = await fetch(`/api/data?sort=${sort}`);
                if (!response.ok) throw new Error('Failed to fetch data');
                const data = await response.json();
                render(data.items);
            } catch (err) {
                statusEl.textContent = err.message || 'An error occurred';
                statusEl.classList.add('error');
            }
        }

        function render(items) {
            tbody.textContent = '';
            for (const item of items) {
                const row = tbody.insertRow();
                row.insertCell().textContent = item.filename;
                const date = row.insertCell();
                date.textContent = new Date(item.created_at).toLocaleString();
                date.className = 'date';
            }
            statusEl.hidden = true;
            table.hidden = false;
        }

        buttons.forEach((button) => {
            button.addEventListener('click', () => {
                buttons.forEach((b) => b.classList.remove('active'));
                button.classList.add('active');
                fetchData(button.dataset.sort);
            });
        });

        fetchData('date-asc');
    </script>
</body>
</html>
"#;
