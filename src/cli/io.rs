//! Terminal I/O for the CLI
//!
//! - One-shot commands write a single JSON object to stdout
//! - The interactive menu reads one line per prompt
//! - UTF-8 only

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use serde_json::Value;

use crate::registry::{RegistryError, RegistryResult};

use super::errors::CliResult;

/// Write a success response to `out`
pub fn write_response_to<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response to `out`
pub fn write_error_to<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_error_to(&mut io::stdout(), code, message)
}

/// Reads one line without its terminator. `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// Parses user-typed numeric input.
///
/// # Errors
///
/// `MalformedNumericInput` naming `field` and the raw text.
pub fn parse_number<T: FromStr>(field: &'static str, input: &str) -> RegistryResult<T> {
    input
        .trim()
        .parse()
        .map_err(|_| RegistryError::MalformedNumericInput {
            field,
            input: input.to_string(),
        })
}
