//! HTTP Server Configuration
//!
//! Bind address, CORS origins and the static asset directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3001;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory served for paths no route matches (default: "dist").
    /// Ignored when the directory does not exist.
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("dist"))
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            static_dir: default_static_dir(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Static directory, if configured and present on disk
    pub fn existing_static_dir(&self) -> Option<&PathBuf> {
        self.static_dir.as_ref().filter(|dir| dir.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.static_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_serde_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 4000}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.static_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_missing_static_dir_is_ignored() {
        let config = HttpServerConfig {
            static_dir: Some(PathBuf::from("/definitely/not/here")),
            ..Default::default()
        };
        assert!(config.existing_static_dir().is_none());
    }
}
