//! CLI command implementations

use std::path::Path;

use serde_json::json;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event};
use crate::phonebook::Phonebook;
use crate::store::{FilePersonStore, MemoryPersonStore, PersonStore, STORE_FILE_NAME};

use super::args::{Cli, Command, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Loads `.env`, parses arguments and dispatches. This is the only
/// function that main.rs should call.
pub fn run() -> CliResult<()> {
    load_dotenv()?;
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::Check { data_dir } => check(&data_dir),
    }
}

/// A missing `.env` is fine; an unreadable one is not.
fn load_dotenv() -> CliResult<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(CliError::config_error(format!("Failed to load .env: {}", e))),
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Open the configured store and serve HTTP until shutdown
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = args.http_config();
    let rt = runtime()?;

    match &args.data_dir {
        Some(data_dir) => {
            let store = FilePersonStore::open(data_dir)?;
            let path = store.path().display().to_string();
            let fields = [("backend", "file"), ("path", path.as_str())];
            rt.block_on(serve_with(config, store, &fields))
        }
        None => rt.block_on(serve_with(
            config,
            MemoryPersonStore::new(),
            &[("backend", "memory")],
        )),
    }
}

async fn serve_with<S: PersonStore + 'static>(
    config: HttpServerConfig,
    store: S,
    store_fields: &[(&str, &str)],
) -> CliResult<()> {
    let persons = store.count().await?.to_string();
    let mut fields = store_fields.to_vec();
    fields.push(("persons", persons.as_str()));
    log_event_with_fields(Event::StoreOpened, &fields);

    let server = HttpServer::new(config, Phonebook::new(store));
    server.start().await.map_err(|e| {
        let message = e.to_string();
        log_event_with_fields(Event::BootFailed, &[("message", message.as_str())]);
        CliError::boot_failed(format!("HTTP server failed: {}", message))
    })
}

/// Replay a data directory read-only and print what it holds.
///
/// Fails with a store error if the person file is missing or any record
/// is corrupted.
pub fn check(data_dir: &Path) -> CliResult<()> {
    let persons = FilePersonStore::load(data_dir)?;

    write_json(&json!({
        "path": data_dir.join(STORE_FILE_NAME).display().to_string(),
        "persons": persons.len(),
        "status": "ok",
    }))
}
