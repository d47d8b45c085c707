use flashcopy_config::AppConfig;
use flashcopy_search::IdleStatus;
use flashcopy_terminal_ui::ansi::{BOLD, DIM, RESET, strip_ansi_codes};
use unicode_width::UnicodeWidthStr;

const DEBUG_INDICATOR: &str = "!! DEBUG ON !!";
const WARNING_COLOUR: &str = "\x1b[33m";
/// Minimum gap between the query and a right-aligned notice.
const NOTICE_GAP: usize = 3;

/// One frame of the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBar {
    pub text: String,
    /// 0-based column the cursor sits on, right after the query.
    pub cursor_col: usize,
}

/// Terminal cells taken by `text` once colour codes are removed.
fn display_width(text: &str) -> usize {
    strip_ansi_codes(text).as_str().width()
}

pub fn build_prompt(
    config: &AppConfig,
    query: &str,
    idle: IdleStatus,
    debug: bool,
    width: usize,
) -> PromptBar {
    let mut text = format!(
        "{}{}{} ",
        config.prompt_colour, config.prompt_indicator, RESET
    );
    let cursor_col = display_width(&text) + query.width();

    if !query.is_empty() {
        text.push_str(query);
    } else if !config.prompt_placeholder_text.is_empty() {
        text.push_str(DIM);
        text.push_str(&config.prompt_placeholder_text);
        text.push_str(RESET);
    }

    let notice = match idle {
        IdleStatus::Warning { remaining_secs } => Some((
            format!("Idle, terminating in {}s...", remaining_secs),
            format!("{BOLD}{WARNING_COLOUR}"),
        )),
        _ if debug => Some((DEBUG_INDICATOR.to_string(), DIM.to_string())),
        _ => None,
    };

    if let Some((notice, style)) = notice {
        let used = display_width(&text);
        let notice_len = notice.width();
        if used + notice_len + NOTICE_GAP < width {
            let padding = width - used - notice_len - 1;
            text.push_str(&" ".repeat(padding));
            text.push_str(&style);
            text.push_str(&notice);
            text.push_str(RESET);
        }
    }

    PromptBar { text, cursor_col }
}
