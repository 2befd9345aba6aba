//! # Phonebook HTTP Server Module
//!
//! Axum routers for the phonebook API.
//!
//! # Endpoints
//!
//! - `/api/persons` - list and create persons
//! - `/api/persons/:id` - get, update and delete one person
//! - `/info` - HTML summary
//! - `/health` - Health check
//!
//! Any other path is answered from the static directory when one exists,
//! otherwise with 404 `{"error": "unknown endpoint"}`.

pub mod config;
pub mod errors;
pub mod info_routes;
pub mod person_routes;
pub mod request_log;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::{build_router, HttpServer};
