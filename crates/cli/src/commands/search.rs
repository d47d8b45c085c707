use std::path::Path;

use anyhow::Result;
use flashcopy_config::AppConfig;
use flashcopy_search::{SearchEngine, SearchResults};
use flashcopy_terminal_ui::{LineStyles, render_line, render_plain};
use serde::Serialize;

use crate::input::read_plain_lines;

#[derive(Debug, Serialize)]
struct MatchRecord {
    line: usize,
    col: usize,
    text: String,
    label: Option<char>,
    payload: String,
}

pub fn run(query: &str, file: Option<&Path>, json: bool) -> Result<()> {
    let config = AppConfig::load_or_default();
    let engine = SearchEngine::new(read_plain_lines(file)?, config.search_config())?;
    let results = engine.search(query)?;
    log::info!(
        "{:?} over {} lines: {} matches, {} labelled",
        query,
        engine.lines().len(),
        results.count(),
        results.labeled_count()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&records(&engine, &results))?);
    } else {
        for line in render_lines(&engine, &results, &config.line_styles()) {
            println!("{}", line);
        }
        eprintln!(
            "{} matches, {} labelled",
            results.count(),
            results.labeled_count()
        );
    }
    Ok(())
}

fn records(engine: &SearchEngine, results: &SearchResults) -> Vec<MatchRecord> {
    results
        .matches()
        .iter()
        .map(|m| MatchRecord {
            line: m.line,
            col: m.start_col,
            text: m.text.clone(),
            label: m.label,
            payload: engine.payload(m),
        })
        .collect()
}

fn render_lines(
    engine: &SearchEngine,
    results: &SearchResults,
    styles: &LineStyles,
) -> Vec<String> {
    engine
        .lines()
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if results.has_matches_on_line(idx) {
                render_line(line, &results.matches_on_line(idx), styles)
            } else {
                render_plain(line, styles)
            }
        })
        .collect()
}
