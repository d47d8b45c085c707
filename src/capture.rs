//! Captured pane text, kept in two forms: as drawn (with the program's own
//! colours) and plain (what the engine searches).

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use flashcopy_search::{split_capture_bytes, validate_lines};
use flashcopy_terminal_ui::ansi::{has_ansi_codes, strip_ansi_codes};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    display: Vec<String>,
    plain: Vec<String>,
}

impl Capture {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let display = split_capture_bytes(bytes)?;
        let plain: Vec<String> = display.iter().map(|line| strip_ansi_codes(line)).collect();
        validate_lines(&plain)?;
        Ok(Self { display, plain })
    }

    /// Reads `path`, or stdin when no path is given.
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let bytes = match path {
            Some(path) => fs::read(path)
                .with_context(|| format!("failed to read capture {}", path.display()))?,
            None => {
                let mut bytes = Vec::new();
                io::stdin()
                    .read_to_end(&mut bytes)
                    .context("failed to read capture from stdin")?;
                bytes
            }
        };
        let capture = Self::from_bytes(&bytes)?;
        log::debug!(
            "captured {} lines, {} coloured",
            capture.len(),
            capture.display.iter().filter(|l| has_ansi_codes(l)).count()
        );
        Ok(capture)
    }

    /// The bottom `rows` lines, which is what fits above the prompt bar.
    pub fn tail(&self, rows: usize) -> Self {
        let skip = self.plain.len().saturating_sub(rows);
        Self {
            display: self.display[skip..].to_vec(),
            plain: self.plain[skip..].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.plain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    pub fn plain_lines(&self) -> &[String] {
        &self.plain
    }

    pub fn display_line(&self, index: usize) -> Option<&str> {
        self.display.get(index).map(String::as_str)
    }

    pub fn plain_line(&self, index: usize) -> Option<&str> {
        self.plain.get(index).map(String::as_str)
    }
}
