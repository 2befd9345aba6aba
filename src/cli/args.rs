//! CLI argument definitions using clap
//!
//! Commands:
//! - phonebook serve [--host] [--port] [--data-dir] [--static-dir] [--cors-origin]...
//! - phonebook check --data-dir <dir>
//!
//! Every serve flag falls back to an environment variable, which may in
//! turn come from a `.env` file in the working directory.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::http_server::config::DEFAULT_PORT;
use crate::http_server::HttpServerConfig;

/// Phonebook - a small phonebook service
#[derive(Parser, Debug)]
#[command(name = "phonebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Verify a data directory and report how many persons it holds
    Check {
        /// Directory containing persons.dat
        #[arg(long, env = "PHONEBOOK_DATA_DIR")]
        data_dir: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Persist persons under this directory; in-memory when omitted
    #[arg(long, env = "PHONEBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Static assets served for paths no route matches
    #[arg(long, env = "PHONEBOOK_STATIC_DIR", default_value = "dist")]
    pub static_dir: PathBuf,

    /// Allowed CORS origin (repeatable); any origin when omitted
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,
}

impl ServeArgs {
    /// HTTP server configuration for these arguments
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            static_dir: Some(self.static_dir.clone()),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "phonebook",
            "serve",
            "--port",
            "4000",
            "--data-dir",
            "/tmp/phonebook",
            "--cors-origin",
            "http://localhost:5173",
        ])
        .unwrap();

        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = args.http_config();
        assert_eq!(config.port, 4000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/phonebook")));
    }

    #[test]
    fn test_check_requires_data_dir_flag_or_env() {
        let parsed = Cli::try_parse_from(["phonebook", "check", "--data-dir", "/tmp/pb"]).unwrap();
        assert!(matches!(
            parsed.command,
            Command::Check { data_dir } if data_dir == PathBuf::from("/tmp/pb")
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
