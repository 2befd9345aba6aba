//! CLI module for the phonebook
//!
//! Provides command-line interface for:
//! - serve: open the person store and run the HTTP server
//! - check: verify a data directory without serving

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
