//! SGR helpers for text that may already carry colour codes.

use std::sync::OnceLock;

use regex::Regex;

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

fn sgr_pattern() -> &'static Regex {
    static SGR_PATTERN: OnceLock<Regex> = OnceLock::new();
    SGR_PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("SGR pattern is valid"))
}

pub fn strip_ansi_codes(text: &str) -> String {
    sgr_pattern().replace_all(text, "").into_owned()
}

pub fn has_ansi_codes(text: &str) -> bool {
    sgr_pattern().is_match(text)
}

/// Number of visible code points once colour codes are removed.
pub fn visible_len(text: &str) -> usize {
    sgr_pattern()
        .split(text)
        .map(|segment| segment.chars().count())
        .sum()
}

/// Dims a line without losing its own colours: every reset is followed by a
/// fresh dim so the rest of the line stays dimmed.
pub fn dim_coloured_line(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(line.len() + 16);
    if !line.starts_with(DIM) {
        out.push_str(DIM);
    }
    out.push_str(&line.replace(RESET, &format!("{RESET}{DIM}")));
    if !line.ends_with(RESET) {
        out.push_str(RESET);
    }
    out
}
