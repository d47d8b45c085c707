use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::error::MatchError;

/// One occurrence of the query inside a captured line.
///
/// Columns are code-point indices into the line, never byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub line: usize,
    pub start_col: usize,
    /// Matched text with the line's original casing.
    pub text: String,
    /// Character right after the match, if the line continues.
    pub following: Option<char>,
    pub label: Option<char>,
}

impl SearchMatch {
    pub fn new(line: usize, start_col: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            start_col,
            text: text.into(),
            following: None,
            label: None,
        }
    }

    pub fn with_following(mut self, following: Option<char>) -> Self {
        self.following = following;
        self
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn end_col(&self) -> usize {
        self.start_col + self.len()
    }

    pub fn contains(&self, line: usize, col: usize) -> bool {
        self.line == line && col >= self.start_col && col < self.end_col()
    }
}

/// Rejects lines the matcher cannot place labels on reliably.
pub fn validate_lines<S: AsRef<str>>(lines: &[S]) -> Result<(), MatchError> {
    for (line_idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let reason = if line.contains('\n') || line.contains('\r') {
            Some("line contains a line break")
        } else if line.contains('\x1b') {
            Some("line contains an escape sequence")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(MatchError::MalformedInput {
                line: line_idx,
                reason,
            });
        }
    }
    Ok(())
}

/// Splits raw captured bytes into lines, failing on the first line that is
/// not valid UTF-8. A single trailing newline does not produce an empty line.
pub fn split_capture_bytes(bytes: &[u8]) -> Result<Vec<String>, MatchError> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    bytes
        .split(|b| *b == b'\n')
        .enumerate()
        .map(|(line_idx, raw)| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            std::str::from_utf8(raw)
                .map(str::to_string)
                .map_err(|_| MatchError::MalformedInput {
                    line: line_idx,
                    reason: "line is not valid UTF-8",
                })
        })
        .collect()
}

/// Longest query the matcher accepts. Anything longer is almost always an
/// accidental paste.
pub const MAX_QUERY_CHARS: usize = 1024;

/// Compiles `query` as an escaped literal, so the builder only contributes
/// case folding. `None` for an empty or whitespace-only query.
fn literal_regex(query: &str, case_sensitive: bool) -> Result<Option<Regex>, MatchError> {
    if query.trim().is_empty() {
        return Ok(None);
    }

    let query_chars = query.chars().count();
    if query_chars > MAX_QUERY_CHARS {
        log::warn!(
            "rejecting {}-character query (limit {})",
            query_chars,
            MAX_QUERY_CHARS
        );
        return Err(MatchError::InvalidQuery {
            reason: format!("query is longer than {} characters", MAX_QUERY_CHARS),
        });
    }

    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(regex) => Ok(Some(regex)),
        Err(e) => {
            log::warn!("failed to compile {}-character query: {}", query_chars, e);
            Err(MatchError::InvalidQuery {
                reason: e.to_string(),
            })
        }
    }
}

/// Finds every non-overlapping occurrence of `query`, line by line, left to
/// right. An empty or whitespace-only query matches nothing.
pub fn find_matches<S: AsRef<str>>(
    lines: &[S],
    query: &str,
    case_sensitive: bool,
) -> Result<Vec<SearchMatch>, MatchError> {
    validate_lines(lines)?;

    let Some(regex) = literal_regex(query, case_sensitive)? else {
        return Ok(Vec::new());
    };

    let mut matches = Vec::new();
    for (line_idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        for found in regex.find_iter(line) {
            if found.is_empty() {
                continue;
            }
            let start_col = line[..found.start()].chars().count();
            let following = line[found.end()..].chars().next();
            matches.push(
                SearchMatch::new(line_idx, start_col, found.as_str()).with_following(following),
            );
        }
    }

    Ok(matches)
}

/// Characters that directly follow an occurrence of `query` anywhere on
/// screen, sorted and deduplicated. Unlike `find_matches`, overlapping
/// occurrences count too: in `aaab`, `aa` is followed by both `a` and `b`.
pub fn continuation_chars<S: AsRef<str>>(
    lines: &[S],
    query: &str,
    case_sensitive: bool,
) -> Result<Vec<char>, MatchError> {
    validate_lines(lines)?;

    let Some(regex) = literal_regex(query, case_sensitive)? else {
        return Ok(Vec::new());
    };

    let mut continuations = Vec::new();
    for line in lines {
        let line = line.as_ref();
        let mut pos = 0;
        while let Some(found) = regex.find_at(line, pos) {
            if let Some(next) = line[found.end()..].chars().next() {
                continuations.push(next);
            }
            // Step one character past the start to catch overlaps.
            pos = found.start()
                + line[found.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
    }

    continuations.sort_unstable();
    continuations.dedup();
    Ok(continuations)
}

/// Labeled matches for one query evaluation, kept in label-assignment order.
#[derive(Debug, Clone)]
pub struct SearchResults {
    matches: Vec<SearchMatch>,
    match_indices_by_line: HashMap<usize, Vec<usize>>,
}

impl Default for SearchResults {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchResults {
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
            match_indices_by_line: HashMap::new(),
        }
    }

    pub fn from_matches(matches: Vec<SearchMatch>) -> Self {
        let match_indices_by_line = Self::build_match_indices_by_line(&matches);
        Self {
            matches,
            match_indices_by_line,
        }
    }

    fn build_match_indices_by_line(matches: &[SearchMatch]) -> HashMap<usize, Vec<usize>> {
        let mut indices_by_line: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, m) in matches.iter().enumerate() {
            indices_by_line.entry(m.line).or_default().push(index);
        }
        for indices in indices_by_line.values_mut() {
            indices.sort_by_key(|&i| matches[i].start_col);
        }
        indices_by_line
    }

    pub fn count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// First match in assignment order; what Enter selects.
    pub fn first(&self) -> Option<&SearchMatch> {
        self.matches.first()
    }

    pub fn labeled_count(&self) -> usize {
        self.matches.iter().filter(|m| m.label.is_some()).count()
    }

    pub fn match_by_label(&self, label: char) -> Option<&SearchMatch> {
        self.matches.iter().find(|m| m.label == Some(label))
    }

    /// Matches on `line`, ordered by column.
    pub fn matches_on_line(&self, line: usize) -> Vec<&SearchMatch> {
        self.match_indices_by_line
            .get(&line)
            .map(|indices| indices.iter().map(|&i| &self.matches[i]).collect())
            .unwrap_or_default()
    }

    pub fn has_matches_on_line(&self, line: usize) -> bool {
        self.match_indices_by_line.contains_key(&line)
    }

    pub fn is_any_match(&self, line: usize, col: usize) -> bool {
        self.matches_on_line(line)
            .iter()
            .any(|m| m.contains(line, col))
    }
}
