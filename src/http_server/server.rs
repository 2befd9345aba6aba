//! # HTTP Server
//!
//! Combines the person, info and health routers with CORS, request logging,
//! static assets and the unknown-endpoint fallback.

use std::net::SocketAddr;

use axum::handler::HandlerWithoutStateExt;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::observability::{log_event, log_event_with_fields, Event};
use crate::phonebook::Phonebook;
use crate::store::PersonStore;

use super::config::HttpServerConfig;
use super::errors::unknown_endpoint;
use super::info_routes::{health_routes, info_routes};
use super::person_routes::person_routes;
use super::request_log::log_requests;

/// HTTP server for the phonebook
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server answering from `phonebook`
    pub fn new<S>(config: HttpServerConfig, phonebook: Phonebook<S>) -> Self
    where
        S: PersonStore + 'static,
    {
        let router = build_router(&config, phonebook);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Event::ServerStarted, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ServerStopped);
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router<S: PersonStore + 'static>(
    config: &HttpServerConfig,
    phonebook: Phonebook<S>,
) -> Router {
    let router = Router::new()
        .merge(health_routes())
        .merge(info_routes(phonebook.clone()))
        .merge(person_routes(phonebook));

    let router = match config.existing_static_dir() {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(unknown_endpoint.into_service()),
        ),
        None => router.fallback(unknown_endpoint),
    };

    router
        .layer(middleware::from_fn(log_requests))
        .layer(cors_layer(config))
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let origins = if config.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
