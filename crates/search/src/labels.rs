use std::collections::HashSet;

use crate::error::AlphabetError;
use crate::matcher::SearchMatch;

/// Home row first, then the upper and lower rows, lowercase before uppercase.
pub const DEFAULT_LABELS: &str = "asdfghjklqwertyuiopzxcvbnmASDFGHJKLQWERTYUIOPZXCVBNM";

/// Ordered set of label characters; never contains duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAlphabet {
    chars: Vec<char>,
}

impl Default for LabelAlphabet {
    fn default() -> Self {
        Self {
            chars: DEFAULT_LABELS.chars().collect(),
        }
    }
}

impl LabelAlphabet {
    /// Builds an alphabet from user input. Repeated characters keep their
    /// first position; whitespace and control characters are dropped.
    pub fn new(labels: &str) -> Result<Self, AlphabetError> {
        let mut chars: Vec<char> = Vec::new();
        for c in labels.chars() {
            if c.is_whitespace() || c.is_control() || chars.contains(&c) {
                continue;
            }
            chars.push(c);
        }

        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }
        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

fn same_char(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}

/// Alphabet minus every character that would continue the query into text
/// that is already on screen. Typing one of those narrows the search instead
/// of selecting a label. `continuations` comes from `continuation_chars` and
/// is empty for an empty query, so nothing is excluded then.
pub fn usable_alphabet(
    alphabet: &LabelAlphabet,
    continuations: &[char],
    case_sensitive: bool,
) -> Vec<char> {
    alphabet
        .chars()
        .iter()
        .copied()
        .filter(|&c| {
            !continuations
                .iter()
                .any(|&next| same_char(c, next, case_sensitive))
        })
        .collect()
}

/// Column a label for `m` is drawn on in a line `line_width` cells wide: the
/// cell right after the match, or the match's own last cell at end of line.
pub fn label_cell(m: &SearchMatch, line_width: usize) -> usize {
    let end = m.end_col();
    if end < line_width {
        end
    } else {
        end.saturating_sub(1)
    }
}

/// Matches whose label cell is already taken by a match further left on the
/// same line. Their label could never be drawn, so they get none.
fn hidden_label_cells(matches: &[SearchMatch], line_widths: &[usize]) -> HashSet<(usize, usize)> {
    let mut by_position: Vec<&SearchMatch> = matches.iter().collect();
    by_position.sort_by_key(|m| (m.line, m.start_col));

    let mut claimed: HashSet<(usize, usize)> = HashSet::new();
    let mut hidden = HashSet::new();
    for m in by_position {
        let width = line_widths.get(m.line).copied().unwrap_or_else(|| m.end_col());
        let cell = (m.line, label_cell(m, width));
        if !claimed.insert(cell) {
            hidden.insert((m.line, m.start_col));
        }
    }
    hidden
}

/// Assigns labels from `usable` in display priority order and returns the
/// matches in that order. `reverse` walks bottom-to-top and right-to-left.
/// `line_widths[i]` is the width of line `i`, used to leave matches whose
/// label would land on a neighbour's label cell unlabeled.
pub fn assign_labels(
    matches: Vec<SearchMatch>,
    usable: &[char],
    reverse: bool,
    line_widths: &[usize],
) -> Vec<SearchMatch> {
    let hidden = hidden_label_cells(&matches, line_widths);

    let mut ordered = matches;
    ordered.sort_by_key(|m| (m.line, m.start_col));
    if reverse {
        ordered.reverse();
    }

    let mut labels = usable.iter().copied();
    for m in &mut ordered {
        if hidden.contains(&(m.line, m.start_col)) {
            log::trace!(
                "no label for line {}, col {}: its label cell is taken",
                m.line,
                m.start_col
            );
            m.label = None;
            continue;
        }
        m.label = labels.next();
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{continuation_chars, find_matches};

    fn labels_of(matches: &[SearchMatch]) -> Vec<Option<char>> {
        matches.iter().map(|m| m.label).collect()
    }

    fn widths(lines: &[&str]) -> Vec<usize> {
        lines.iter().map(|l| l.chars().count()).collect()
    }

    fn usable_for(lines: &[&str], alphabet: &LabelAlphabet, query: &str, cs: bool) -> Vec<char> {
        let continuations = continuation_chars(lines, query, cs).unwrap();
        usable_alphabet(alphabet, &continuations, cs)
    }

    fn label(
        lines: &[&str],
        alphabet: &LabelAlphabet,
        query: &str,
        reverse: bool,
    ) -> Vec<SearchMatch> {
        let matches = find_matches(lines, query, false).unwrap();
        let usable = usable_for(lines, alphabet, query, false);
        assign_labels(matches, &usable, reverse, &widths(lines))
    }

    #[test]
    fn test_alphabet_drops_duplicates_and_whitespace() {
        let alphabet = LabelAlphabet::new("a sd\tfa").unwrap();
        assert_eq!(alphabet.chars(), &['a', 's', 'd', 'f']);
        assert_eq!(LabelAlphabet::new("  \n"), Err(AlphabetError::Empty));
        assert_eq!(LabelAlphabet::default().len(), 52);
    }

    #[test]
    fn test_continuation_characters_are_excluded() {
        let usable = usable_for(&["test", "tent"], &LabelAlphabet::default(), "te", false);
        assert!(!usable.contains(&'s'));
        assert!(!usable.contains(&'S'));
        assert!(!usable.contains(&'n'));
        assert!(usable.contains(&'a'));
    }

    #[test]
    fn test_case_sensitive_exclusion_is_exact() {
        let usable = usable_for(&["teSt"], &LabelAlphabet::default(), "te", true);
        assert!(!usable.contains(&'S'));
        assert!(usable.contains(&'s'));
    }

    #[test]
    fn test_overlapping_occurrence_excludes_its_continuation() {
        // The only reported match is "aa" at 0, but "aa" at 1 is followed by 'b'.
        let alphabet = LabelAlphabet::new("bc").unwrap();
        let usable = usable_for(&["aaab"], &alphabet, "aa", false);
        assert_eq!(usable, vec!['c']);
    }

    #[test]
    fn test_empty_query_keeps_full_alphabet() {
        let alphabet = LabelAlphabet::default();
        let usable = usable_for(&["anything"], &alphabet, "", false);
        assert_eq!(usable, alphabet.chars());
    }

    #[test]
    fn test_forward_assignment_order() {
        let labeled = label(&["x1 x2", "x3"], &LabelAlphabet::default(), "x", false);
        let order: Vec<(usize, usize)> = labeled.iter().map(|m| (m.line, m.start_col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 3), (1, 0)]);
        assert_eq!(labels_of(&labeled), vec![Some('a'), Some('s'), Some('d')]);
    }

    #[test]
    fn test_reverse_assignment_order() {
        let labeled = label(&["x1 x2", "x3"], &LabelAlphabet::default(), "x", true);
        let order: Vec<(usize, usize)> = labeled.iter().map(|m| (m.line, m.start_col)).collect();
        assert_eq!(order, vec![(1, 0), (0, 3), (0, 0)]);
        assert_eq!(labels_of(&labeled), vec![Some('a'), Some('s'), Some('d')]);
    }

    #[test]
    fn test_labels_are_unique_until_exhausted() {
        let alphabet = LabelAlphabet::new("abc").unwrap();
        let labeled = label(&["z z z z z"], &alphabet, "z", false);
        assert_eq!(
            labels_of(&labeled),
            vec![Some('a'), Some('b'), Some('c'), None, None]
        );
    }

    #[test]
    fn test_excluded_label_is_skipped() {
        // 'a' and 'b' follow the matches, so only 'c' is left.
        let alphabet = LabelAlphabet::new("abc").unwrap();
        let labeled = label(&["za zb"], &alphabet, "z", false);
        assert_eq!(labels_of(&labeled), vec![Some('c'), None]);
    }

    #[test]
    fn test_label_cell() {
        let m = SearchMatch::new(0, 0, "ab");
        assert_eq!(label_cell(&m, 5), 2);
        assert_eq!(label_cell(&m, 2), 1);
    }

    #[test]
    fn test_match_with_covered_label_cell_stays_unlabeled() {
        // Both labels would land on column 1; only the left match keeps one
        // and no alphabet character is spent on the other.
        let alphabet = LabelAlphabet::new("xyz").unwrap();
        let labeled = label(&["aa"], &alphabet, "a", true);
        let order: Vec<(usize, usize)> = labeled.iter().map(|m| (m.line, m.start_col)).collect();
        assert_eq!(order, vec![(0, 1), (0, 0)]);
        assert_eq!(labels_of(&labeled), vec![None, Some('x')]);
    }

    #[test]
    fn test_adjacent_matches_with_free_cells_all_get_labels() {
        let alphabet = LabelAlphabet::new("xyz").unwrap();
        let labeled = label(&["a a"], &alphabet, "a", false);
        assert_eq!(labels_of(&labeled), vec![Some('x'), Some('y')]);
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let lines = ["alpha beta", "gamma alpha", "delta"];
        let run = || label(&lines, &LabelAlphabet::default(), "a", true);
        assert_eq!(run(), run());
    }
}
