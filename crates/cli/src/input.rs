use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use flashcopy_search::split_capture_bytes;
use flashcopy_terminal_ui::ansi::strip_ansi_codes;

/// Reads captured text from `path` or stdin as plain, colour-free lines.
pub fn read_plain_lines(path: Option<&Path>) -> Result<Vec<String>> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            bytes
        }
    };
    let lines: Vec<String> = split_capture_bytes(&bytes)?
        .iter()
        .map(|line| strip_ansi_codes(line))
        .collect();
    log::debug!("read {} bytes as {} lines", bytes.len(), lines.len());
    Ok(lines)
}
