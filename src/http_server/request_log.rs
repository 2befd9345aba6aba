//! Request logging middleware
//!
//! Logs one `HTTP_REQUEST` line per request with method, url, status,
//! response content length, response time and the JSON request body.

use std::time::Instant;

use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::observability::{log_event_with_fields, Event};

/// Largest request body buffered for logging
pub const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Axum middleware, install with `axum::middleware::from_fn(log_requests)`
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let url = request.uri().to_string();

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::PAYLOAD_TOO_LARGE.into_response(),
    };
    let logged_body = describe_body(&bytes);

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let status = response.status().as_u16().to_string();
    let content_length = response_content_length(&response);
    let elapsed_ms = format!("{:.3}", started.elapsed().as_secs_f64() * 1000.0);

    log_event_with_fields(
        Event::HttpRequest,
        &[
            ("method", method.as_str()),
            ("url", url.as_str()),
            ("status", status.as_str()),
            ("content_length", content_length.as_str()),
            ("response_time_ms", elapsed_ms.as_str()),
            ("body", logged_body.as_str()),
        ],
    );

    response
}

/// `Content-Length` header when set, else the exact body size; `-` for an
/// empty body
fn response_content_length(response: &Response) -> String {
    if let Some(value) = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
    {
        return value.to_string();
    }

    match response.body().size_hint().exact() {
        Some(len) if len > 0 => len.to_string(),
        _ => "-".to_string(),
    }
}

/// Compact JSON for JSON bodies, `{}` for none, lossy text otherwise
fn describe_body(bytes: &Bytes) -> String {
    if bytes.is_empty() {
        return "{}".to_string();
    }
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
