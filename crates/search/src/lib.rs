//! Incremental search-and-label engine for the flashcopy overlay.

mod engine;
mod error;
mod idle;
mod labels;
mod matcher;
mod state;
mod words;

pub use engine::{SearchConfig, SearchEngine};
pub use error::{AlphabetError, MatchError};
pub use idle::{IdleStatus, IdleTimer};
pub use labels::{DEFAULT_LABELS, LabelAlphabet, assign_labels, label_cell, usable_alphabet};
pub use matcher::{
    MAX_QUERY_CHARS, SearchMatch, SearchResults, continuation_chars, find_matches,
    split_capture_bytes, validate_lines,
};
pub use state::{KeyInput, SearchState, Selection, SessionPhase, Transition};
pub use words::{WordSeparators, extract_word};
