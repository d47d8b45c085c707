//! Interactive overlay: draws the captured pane on stderr, feeds decoded keys
//! to the search session and reports how the session ended.

mod input;
mod prompt;

use std::{
    io::{self, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand, QueueableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use flashcopy_config::{AppConfig, PromptPosition};
use flashcopy_search::{IdleStatus, IdleTimer, SearchEngine, SearchState, Selection, Transition};
use flashcopy_terminal_ui::{LineStyles, ansi::dim_coloured_line, render_line};

use crate::capture::Capture;
use input::decode_key;
use prompt::build_prompt;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(Selection),
    Cancelled,
    TimedOut,
}

pub struct Overlay<'a> {
    config: &'a AppConfig,
    capture: Capture,
    state: SearchState,
    timer: IdleTimer,
    styles: LineStyles,
    debug: bool,
}

impl<'a> Overlay<'a> {
    pub fn new(config: &'a AppConfig, capture: Capture, debug: bool) -> Result<Self> {
        let engine = SearchEngine::new(capture.plain_lines().to_vec(), config.search_config())?;
        Ok(Self {
            config,
            capture,
            state: SearchState::new(engine, config.auto_paste),
            timer: config.idle_timer(),
            styles: config.line_styles(),
            debug,
        })
    }

    /// Starts the session with `query` already typed.
    pub fn with_query(mut self, query: &str) -> Result<Self> {
        self.state.set_query(query)?;
        Ok(self)
    }

    pub fn run(&mut self) -> Result<Outcome> {
        let _guard = TerminalGuard::enter()?;
        let mut stderr = io::stderr();
        let mut last_idle = IdleStatus::Active;
        let mut dirty = true;
        self.timer.reset();

        loop {
            if dirty {
                self.draw(&mut stderr)?;
                dirty = false;
            }

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(input) = decode_key(key) {
                            self.timer.reset();
                            match self.state.handle_key(input) {
                                Ok(Transition::Selected(selection)) => {
                                    return Ok(Outcome::Selected(selection));
                                }
                                Ok(Transition::Cancelled) => return Ok(Outcome::Cancelled),
                                Ok(Transition::Updated) => dirty = true,
                                Ok(Transition::Unchanged) => {}
                                Err(e) => log::warn!("ignoring {:?}: {}", input, e),
                            }
                        }
                    }
                    Event::Resize(..) => dirty = true,
                    _ => {}
                }
            }

            let idle = self.timer.status();
            match idle {
                IdleStatus::Expired => {
                    log::info!(
                        "no input for {}s, closing",
                        self.timer.timeout().as_secs()
                    );
                    return Ok(Outcome::TimedOut);
                }
                _ if idle != last_idle => dirty = true,
                _ => {}
            }
            last_idle = idle;
        }
    }

    /// Display strings for every captured line under the current query.
    pub fn content_lines(&self) -> Vec<String> {
        let query_active = !self.state.query().is_empty();
        let results = self.state.results();

        (0..self.capture.len())
            .map(|idx| {
                let display = self.capture.display_line(idx).unwrap_or_default();
                if !query_active {
                    return display.to_string();
                }
                if !results.has_matches_on_line(idx) {
                    return dim_coloured_line(display);
                }
                let plain = self.capture.plain_line(idx).unwrap_or_default();
                render_line(plain, &results.matches_on_line(idx), &self.styles)
            })
            .collect()
    }

    fn draw(&self, out: &mut impl Write) -> Result<()> {
        let (width, height) = terminal::size().context("failed to read terminal size")?;
        let (width, height) = (width as usize, height.max(1) as usize);

        let prompt = build_prompt(
            self.config,
            self.state.query(),
            self.timer.status(),
            self.debug,
            width,
        );
        let (prompt_row, first_content_row) = match self.config.prompt_position {
            PromptPosition::Top => (0, 1),
            PromptPosition::Bottom => (height - 1, 0),
        };

        out.queue(Hide)?.queue(Clear(ClearType::All))?;
        let rows = height.saturating_sub(1);
        let lines = self.content_lines();
        let skip = lines.len().saturating_sub(rows);
        for (offset, line) in lines[skip..].iter().enumerate() {
            out.queue(MoveTo(0, (first_content_row + offset) as u16))?;
            write!(out, "{}", line)?;
        }

        out.queue(MoveTo(0, prompt_row as u16))?
            .queue(Clear(ClearType::CurrentLine))?;
        write!(out, "{}", prompt.text)?;
        out.queue(MoveTo(prompt.cursor_col as u16, prompt_row as u16))?
            .queue(Show)?;
        out.flush()?;
        Ok(())
    }
}

/// Raw mode plus the alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        io::stderr().execute(EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stderr = io::stderr();
        let _ = stderr.execute(Show).and_then(|s| s.execute(LeaveAlternateScreen));
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcopy_search::KeyInput;
    use flashcopy_terminal_ui::ansi::strip_ansi_codes;

    fn overlay<'a>(config: &'a AppConfig, text: &str) -> Overlay<'a> {
        let capture = Capture::from_bytes(text.as_bytes()).unwrap();
        Overlay::new(config, capture, false).unwrap()
    }

    #[test]
    fn no_query_shows_capture_untouched() {
        let config = AppConfig::default();
        let overlay = overlay(&config, "\x1b[31mred\x1b[0m\nplain\n");
        assert_eq!(
            overlay.content_lines(),
            vec!["\x1b[31mred\x1b[0m".to_string(), "plain".to_string()]
        );
    }

    #[test]
    fn query_dims_lines_without_matches() {
        let config = AppConfig::default();
        let overlay = overlay(&config, "hello world\nnothing here\n")
            .with_query("wor")
            .unwrap();
        let lines = overlay.content_lines();
        assert_eq!(lines[1], "\x1b[2mnothing here\x1b[0m");
        assert_eq!(strip_ansi_codes(&lines[0]), "hello worad");
    }

    #[test]
    fn selecting_a_label_ends_the_session() {
        let config = AppConfig::default();
        let mut overlay = overlay(&config, "cargo build\ncargo test\n");
        for c in "cargo".chars() {
            overlay.state.handle_key(KeyInput::Char(c)).unwrap();
        }
        // Reverse order: the bottom line gets the first label.
        let transition = overlay.state.handle_key(KeyInput::Char('a')).unwrap();
        let Transition::Selected(selection) = transition else {
            panic!("expected a selection");
        };
        assert_eq!(selection.text, "cargo");
        assert_eq!(selection.line, 1);
        assert!(!selection.paste);
    }

    #[test]
    fn every_rendered_line_keeps_its_width() {
        let config = AppConfig::default();
        let text = "alpha beta\n  gamma  \ndelta alpha\n";
        let overlay = overlay(&config, text).with_query("a").unwrap();
        for (line, rendered) in text.lines().zip(overlay.content_lines()) {
            assert_eq!(strip_ansi_codes(&rendered).chars().count(), line.chars().count());
        }
    }
}
