use flashcopy_search::SearchMatch;

use crate::ansi::{DIM, RESET};

const DEFAULT_HIGHLIGHT: &str = "\x1b[1;33m";
const DEFAULT_LABEL: &str = "\x1b[1;32m";

/// Escape sequences wrapped around each styled run. They are treated as
/// opaque and never counted as columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStyles {
    pub dim: String,
    pub highlight: String,
    pub label: String,
}

impl Default for LineStyles {
    fn default() -> Self {
        Self {
            dim: DIM.to_string(),
            highlight: DEFAULT_HIGHLIGHT.to_string(),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl LineStyles {
    fn code(&self, style: CellStyle) -> &str {
        match style {
            CellStyle::Dim => &self.dim,
            CellStyle::Highlight => &self.highlight,
            CellStyle::Label => &self.label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Dim,
    Highlight,
    Label,
}

/// Cell a match's label is drawn on. Every variant overwrites an existing
/// cell, so a rendered line is exactly as wide as its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    /// The non-space character right after the match.
    ReplaceNext(usize),
    /// The space right after the match.
    ReplaceSpace(usize),
    /// The match ends the line; its own last cell.
    ReplaceLast(usize),
}

impl LabelPlacement {
    pub fn col(self) -> usize {
        match self {
            Self::ReplaceNext(col) | Self::ReplaceSpace(col) | Self::ReplaceLast(col) => col,
        }
    }
}

pub fn label_placement(line: &[char], m: &SearchMatch) -> LabelPlacement {
    let end = m.end_col();
    match line.get(end) {
        Some(' ') => LabelPlacement::ReplaceSpace(end),
        Some(_) => LabelPlacement::ReplaceNext(end),
        None => LabelPlacement::ReplaceLast(end.saturating_sub(1)),
    }
}

/// Renders one captured line with its matches highlighted and labels
/// overlaid. Everything outside a match is dimmed.
pub fn render_line(line: &str, matches: &[&SearchMatch], styles: &LineStyles) -> String {
    let mut glyphs: Vec<char> = line.chars().collect();
    let mut cells = vec![CellStyle::Dim; glyphs.len()];

    let mut ordered: Vec<&SearchMatch> = matches
        .iter()
        .copied()
        .filter(|m| {
            let fits = !m.is_empty() && m.end_col() <= glyphs.len();
            if !fits {
                log::warn!(
                    "dropping match at line {}, col {}: outside a {}-column line",
                    m.line,
                    m.start_col,
                    glyphs.len()
                );
            }
            fits
        })
        .collect();
    ordered.sort_by_key(|m| m.start_col);

    for m in &ordered {
        cells[m.start_col..m.end_col()].fill(CellStyle::Highlight);
    }

    for m in &ordered {
        let Some(label) = m.label else {
            continue;
        };
        let col = label_placement(&glyphs, m).col();
        if cells[col] == CellStyle::Label {
            log::trace!(
                "label {:?} at line {}, col {} hidden by a neighbouring label",
                label,
                m.line,
                col
            );
            continue;
        }
        glyphs[col] = label;
        cells[col] = CellStyle::Label;
    }

    let mut out = String::with_capacity(line.len() * 2);
    let mut run_start = 0;
    for col in 1..=cells.len() {
        if col < cells.len() && cells[col] == cells[run_start] {
            continue;
        }
        out.push_str(styles.code(cells[run_start]));
        out.extend(&glyphs[run_start..col]);
        out.push_str(RESET);
        run_start = col;
    }
    out
}

/// A line without matches: dimmed as a whole.
pub fn render_plain(line: &str, styles: &LineStyles) -> String {
    render_line(line, &[], styles)
}
