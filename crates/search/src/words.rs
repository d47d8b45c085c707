/// Characters that end a word when extracting the copy payload.
///
/// Whitespace always ends a word; with no configured set, words are plain
/// whitespace-delimited tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSeparators {
    chars: Option<Vec<char>>,
}

impl WordSeparators {
    pub fn new(separators: &str) -> Self {
        if separators.is_empty() {
            return Self::default();
        }
        let mut chars: Vec<char> = Vec::new();
        for c in separators.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        Self { chars: Some(chars) }
    }

    pub fn whitespace_only() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.chars.is_some()
    }

    pub fn is_separator(&self, c: char) -> bool {
        c.is_whitespace()
            || self
                .chars
                .as_ref()
                .is_some_and(|chars| chars.contains(&c))
    }

    pub fn as_string(&self) -> String {
        self.chars
            .as_ref()
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }
}

/// Returns the word to copy for a match starting at `col`.
///
/// The word is the first run of non-separators at or after `col` inside the
/// whitespace-delimited token under `col`, expanded in both directions. A
/// token with no word from `col` onward yields its longest word, and a token
/// made only of separators yields the token itself.
pub fn extract_word(line: &str, col: usize, separators: &WordSeparators) -> String {
    let chars: Vec<char> = line.chars().collect();

    let Some(anchor) = (col..chars.len()).find(|&i| !chars[i].is_whitespace()) else {
        return String::new();
    };

    let mut token_start = anchor;
    while token_start > 0 && !chars[token_start - 1].is_whitespace() {
        token_start -= 1;
    }
    let mut token_end = anchor;
    while token_end < chars.len() && !chars[token_end].is_whitespace() {
        token_end += 1;
    }

    if let Some(word_col) = (anchor..token_end).find(|&i| !separators.is_separator(chars[i])) {
        let mut start = word_col;
        while start > token_start && !separators.is_separator(chars[start - 1]) {
            start -= 1;
        }
        let mut end = word_col;
        while end < token_end && !separators.is_separator(chars[end]) {
            end += 1;
        }
        return chars[start..end].iter().collect();
    }

    let token = &chars[token_start..token_end];
    token
        .split(|c| separators.is_separator(*c))
        .filter(|word| !word.is_empty())
        .fold(None::<&[char]>, |longest, word| match longest {
            Some(best) if best.len() >= word.len() => Some(best),
            _ => Some(word),
        })
        .unwrap_or(token)
        .iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TMUX_STYLE_SEPARATORS: &str = " ()\":,;<>~!@#$%^&*|+=[]{}?`'";

    #[test]
    fn test_payload_skips_leading_separators() {
        let line = r#"bind-key "${bind_key}" run-shell "${PLUGIN_DIR}""#;
        let separators = WordSeparators::new(TMUX_STYLE_SEPARATORS);
        assert_eq!(extract_word(line, 10, &separators), "bind_key");
        assert_eq!(extract_word(line, 34, &separators), "PLUGIN_DIR");
    }

    #[test]
    fn test_payload_expands_from_mid_word() {
        let separators = WordSeparators::new(TMUX_STYLE_SEPARATORS);
        assert_eq!(extract_word("run ${bind_key}", 8, &separators), "bind_key");
        assert_eq!(extract_word("bind-key x", 3, &separators), "bind-key");
    }

    #[test]
    fn test_whitespace_only_separators_copy_whole_token() {
        let separators = WordSeparators::whitespace_only();
        assert!(!separators.is_configured());
        assert_eq!(
            extract_word(r#"say "${bind_key}" now"#, 6, &separators),
            r#""${bind_key}""#
        );
    }

    #[test]
    fn test_trailing_separators_fall_back_to_longest_word() {
        let separators = WordSeparators::new(TMUX_STYLE_SEPARATORS);
        assert_eq!(extract_word("foo(bar)!!", 8, &separators), "foo");
        assert_eq!(extract_word("x := {}", 5, &separators), "{}");
    }

    #[test]
    fn test_out_of_range_column() {
        let separators = WordSeparators::default();
        assert_eq!(extract_word("abc", 3, &separators), "");
        assert_eq!(extract_word("abc   ", 4, &separators), "");
    }

    #[test]
    fn test_unicode_words() {
        let separators = WordSeparators::new(" /");
        assert_eq!(extract_word("/home/j\u{f6}rg/notes", 6, &separators), "j\u{f6}rg");
    }
}
