use crate::engine::SearchEngine;
use crate::error::MatchError;
use crate::matcher::{SearchMatch, SearchResults};

/// Characters that end a word for delete-word-backwards.
const QUERY_WORD_DELIMITERS: &str = " \t-_.,;:!?/\\()[]{}";

/// Logical keys, already decoded from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    DeleteWord,
    Clear,
    Enter,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Payload to hand to the clipboard.
    pub text: String,
    /// The paste modifier was armed when the selection was made.
    pub paste: bool,
    /// `None` when picked with Enter on an unlabeled match.
    pub label: Option<char>,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Searching,
    Selected(Selection),
    Cancelled,
}

impl SessionPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Selected(_) | Self::Cancelled)
    }
}

/// What a key did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Query or matches changed; redraw.
    Updated,
    /// Nothing visible changed.
    Unchanged,
    Selected(Selection),
    Cancelled,
}

/// Manages the search session lifecycle
pub struct SearchState {
    engine: SearchEngine,
    results: SearchResults,
    query: String,
    phase: SessionPhase,
    auto_paste: bool,
    paste_modifier: bool,
}

impl SearchState {
    pub fn new(engine: SearchEngine, auto_paste: bool) -> Self {
        Self {
            engine,
            results: SearchResults::new(),
            query: String::new(),
            phase: SessionPhase::Idle,
            auto_paste,
            paste_modifier: false,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Get current query string
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Get current search results
    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn paste_modifier_active(&self) -> bool {
        self.paste_modifier
    }

    /// Replace the query and re-run the whole pipeline. On error the
    /// previous query and results are kept.
    pub fn set_query(&mut self, query: &str) -> Result<(), MatchError> {
        self.results = self.engine.search(query)?;
        self.query = query.to_string();
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyInput) -> Result<Transition, MatchError> {
        if self.phase.is_finished() {
            return Ok(Transition::Unchanged);
        }

        match key {
            KeyInput::Cancel => {
                log::debug!("search cancelled");
                self.phase = SessionPhase::Cancelled;
                Ok(Transition::Cancelled)
            }
            KeyInput::Enter => {
                let Some(first) = self.results.first().cloned() else {
                    return Ok(Transition::Unchanged);
                };
                Ok(self.select(&first))
            }
            KeyInput::Char(c) => {
                if !self.query.is_empty()
                    && let Some(m) = self.results.match_by_label(c).cloned()
                {
                    return Ok(self.select(&m));
                }

                if self.auto_paste && matches!(c, ';' | ':') {
                    if !self.paste_modifier {
                        log::debug!("paste modifier armed with {:?}", c);
                    }
                    self.paste_modifier = true;
                    return Ok(Transition::Updated);
                }

                let mut query = self.query.clone();
                query.push(c);
                self.update_query(query)
            }
            KeyInput::Backspace => {
                self.paste_modifier = false;
                let mut query = self.query.clone();
                query.pop();
                self.update_query(query)
            }
            KeyInput::DeleteWord => {
                self.paste_modifier = false;
                let query = delete_word_backwards(&self.query);
                self.update_query(query)
            }
            KeyInput::Clear => {
                self.paste_modifier = false;
                self.update_query(String::new())
            }
        }
    }

    fn update_query(&mut self, query: String) -> Result<Transition, MatchError> {
        self.phase = SessionPhase::Searching;
        if query == self.query {
            return Ok(Transition::Unchanged);
        }
        self.set_query(&query)?;
        Ok(Transition::Updated)
    }

    fn select(&mut self, m: &SearchMatch) -> Transition {
        let selection = Selection {
            text: self.engine.payload(m),
            paste: self.paste_modifier,
            label: m.label,
            line: m.line,
            col: m.start_col,
        };
        log::debug!(
            "selected {:?} at line {}, col {} (paste: {})",
            selection.text,
            selection.line,
            selection.col,
            selection.paste
        );
        self.phase = SessionPhase::Selected(selection.clone());
        Transition::Selected(selection)
    }
}

fn delete_word_backwards(query: &str) -> String {
    let is_delimiter = |c: char| QUERY_WORD_DELIMITERS.contains(c);
    let mut chars: Vec<char> = query.trim_end().chars().collect();

    if chars.last().is_some_and(|&c| is_delimiter(c)) {
        while chars.last().is_some_and(|&c| is_delimiter(c)) {
            chars.pop();
        }
    }
    while chars.last().is_some_and(|&c| !is_delimiter(c)) {
        chars.pop();
    }

    chars.into_iter().collect()
}
