//! Standard input as the capture source (stands in for a clipboard read).

use clipmark_core::intake::{SourceError, SourceReader};
use std::io::BufRead;

/// Reads one line from stdin per attempt.
pub struct StdinLine;

impl SourceReader for StdinLine {
    fn read(&self) -> Result<String, SourceError> {
        read_first_line(&mut std::io::stdin().lock())
    }
}

fn read_first_line(input: &mut impl BufRead) -> Result<String, SourceError> {
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .map_err(|e| SourceError(e.to_string()))?;
    if n == 0 {
        return Err(SourceError("stdin is empty".into()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
