//! Info HTTP Routes
//!
//! The `/info` page and the `/health` check.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::phonebook::Phonebook;
use crate::store::PersonStore;

use super::errors::{unknown_endpoint, ApiError};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create info routes
pub fn info_routes<S: PersonStore + 'static>(phonebook: Phonebook<S>) -> Router {
    Router::new()
        .route("/info", get(info_handler::<S>).fallback(unknown_endpoint))
        .with_state(phonebook)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler).fallback(unknown_endpoint))
}

/// Render the info page for `count` people at `now`
pub fn render_info<Tz: TimeZone>(count: usize, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "<p>Phonebook has info for {} people</p>\n<p>{}</p>\n",
        count,
        now.format("%a %b %d %Y %H:%M:%S GMT%z")
    )
}

async fn info_handler<S: PersonStore + 'static>(
    State(phonebook): State<Phonebook<S>>,
) -> Result<Html<String>, ApiError> {
    let count = phonebook.count().await?;
    Ok(Html(render_info(count, &Local::now())))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
