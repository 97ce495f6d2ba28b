//! JSON line I/O for the CLI
//!
//! - Input: one JSON object per line
//! - Output: one JSON object per line, flushed after each
//! - UTF-8 only; other lines are rejected one at a time

use std::io::{BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read JSON requests line by line. Blank lines are skipped.
///
/// Read failures are `IoError`; lines that are not UTF-8 or not JSON are
/// `InvalidCommand`.
pub fn read_requests<R: BufRead>(mut input: R) -> impl Iterator<Item = CliResult<Value>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => return Some(Err(CliError::from(e))),
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                return Some(Err(CliError::invalid_command(format!(
                    "Invalid UTF-8: {}",
                    e
                ))))
            }
        };
        if line.is_empty() {
            continue;
        }

        return Some(
            serde_json::from_str(line)
                .map_err(|e| CliError::invalid_command(format!("Invalid JSON: {}", e))),
        );
    })
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let input = Cursor::new("{\"op\":\"snapshot\"}\n\n  \nnot json\n");
        let results: Vec<_> = read_requests(input).collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap()["op"], "snapshot");
        assert_eq!(results[1].as_ref().unwrap_err().code_str(), "CROSSVIEW_CLI_INVALID_COMMAND");
    }

    #[test]
    fn test_read_requests_rejects_non_utf8_line() {
        let input = Cursor::new(b"{\"op\":\"snapshot\"}\n\xff\xfe garbage\n{\"op\":\"reset\",\"chart\":0}".to_vec());
        let results: Vec<_> = read_requests(input).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[1].as_ref().unwrap_err().code_str(), "CROSSVIEW_CLI_INVALID_COMMAND");
        assert_eq!(results[2].as_ref().unwrap()["op"], "reset");
    }

    #[test]
    fn test_response_shapes() {
        let mut out = Vec::new();
        write_response(&mut out, serde_json::json!({"matched": 3})).unwrap();
        write_error(&mut out, "CROSSVIEW_X", "boom").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["data"]["matched"], 3);
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["code"], "CROSSVIEW_X");
        assert_eq!(lines[1]["message"], "boom");
    }
}
