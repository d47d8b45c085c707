#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// A captured line that cannot be mapped onto screen columns: it still
    /// carries a line break or escape sequence, or is not valid UTF-8.
    #[error("malformed input on line {line}: {reason}")]
    MalformedInput { line: usize, reason: &'static str },

    /// The query could not be turned into a matcher.
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("label alphabet has no usable characters")]
    Empty,
}
