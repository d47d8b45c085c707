use crate::error::MatchError;
use crate::labels::{LabelAlphabet, assign_labels, usable_alphabet};
use crate::matcher::{
    SearchMatch, SearchResults, continuation_chars, find_matches, validate_lines,
};
use crate::words::{WordSeparators, extract_word};

/// Per-session search settings, built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub case_sensitive: bool,
    /// Assign labels bottom-to-top instead of top-to-bottom.
    pub reverse: bool,
    pub alphabet: LabelAlphabet,
    pub word_separators: WordSeparators,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            reverse: true,
            alphabet: LabelAlphabet::default(),
            word_separators: WordSeparators::default(),
        }
    }
}

/// Runs the match and label passes over one captured pane.
pub struct SearchEngine {
    config: SearchConfig,
    lines: Vec<String>,
    /// Width of each line in code points.
    widths: Vec<usize>,
}

impl SearchEngine {
    pub fn new(lines: Vec<String>, config: SearchConfig) -> Result<Self, MatchError> {
        validate_lines(&lines)?;
        let widths = lines.iter().map(|line| line.chars().count()).collect();
        Ok(Self {
            config,
            lines,
            widths,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Evaluates `query` from scratch.
    pub fn search(&self, query: &str) -> Result<SearchResults, MatchError> {
        let case_sensitive = self.config.case_sensitive;
        let matches = find_matches(&self.lines, query, case_sensitive)?;
        let found = matches.len();
        let continuations = continuation_chars(&self.lines, query, case_sensitive)?;
        let usable = usable_alphabet(&self.config.alphabet, &continuations, case_sensitive);
        let labeled = assign_labels(matches, &usable, self.config.reverse, &self.widths);
        let results = SearchResults::from_matches(labeled);

        log::debug!(
            "search query {:?}: {} matches, {} labeled",
            query,
            found,
            results.labeled_count()
        );
        for m in results.matches().iter().take(10) {
            log::trace!(
                "  [{}] line {}, col {}: {:?}",
                m.label.unwrap_or('?'),
                m.line,
                m.start_col,
                m.text
            );
        }
        if found > 10 {
            log::trace!("  ... and {} more matches", found - 10);
        }

        Ok(results)
    }

    /// Word to copy for `m`, bounded by the configured separators.
    pub fn payload(&self, m: &SearchMatch) -> String {
        self.line(m.line)
            .map(|line| extract_word(line, m.start_col, &self.config.word_separators))
            .unwrap_or_default()
    }
}
