use std::path::Path;

use anyhow::Result;
use flashcopy_config::AppConfig;
use flashcopy_search::{LabelAlphabet, continuation_chars, usable_alphabet};

use crate::input::read_plain_lines;

pub fn run(query: Option<&str>, file: Option<&Path>) -> Result<()> {
    let config = AppConfig::load_or_default();
    let alphabet = &config.label_alphabet;

    println!("Label alphabet ({} labels):", alphabet.len());
    println!("  {}", alphabet.as_string());

    let Some(query) = query else {
        return Ok(());
    };

    let lines = read_plain_lines(file)?;
    let (usable, excluded) = narrow(&lines, alphabet, query, config.case_sensitive)?;

    println!();
    println!("Query {:?}:", query);
    println!("  usable   ({}): {}", usable.len(), usable.iter().collect::<String>());
    println!(
        "  excluded ({}): {}",
        excluded.len(),
        excluded.iter().collect::<String>()
    );
    Ok(())
}

/// Splits the alphabet into labels usable for `query` and the ones that
/// would continue it.
fn narrow(
    lines: &[String],
    alphabet: &LabelAlphabet,
    query: &str,
    case_sensitive: bool,
) -> Result<(Vec<char>, Vec<char>)> {
    let continuations = continuation_chars(lines, query, case_sensitive)?;
    let usable = usable_alphabet(alphabet, &continuations, case_sensitive);
    log::debug!(
        "query {:?}: continuations {:?}, {} of {} labels usable",
        query,
        continuations,
        usable.len(),
        alphabet.len()
    );
    let excluded = alphabet
        .chars()
        .iter()
        .copied()
        .filter(|c| !usable.contains(c))
        .collect();
    Ok((usable, excluded))
}
