//! JSON output for one-shot commands

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a JSON value to stdout as one line
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
