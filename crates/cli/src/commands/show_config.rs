use anyhow::Result;
use flashcopy_config::{AppConfig, config_path};

pub fn run() -> Result<()> {
    let config = match config_path() {
        Some(path) if path.exists() => {
            println!("# Config file: {}", path.display());
            AppConfig::load_from(&path)?
        }
        Some(path) => {
            println!("# Config file: {} (not created yet)", path.display());
            println!("# Using default configuration");
            AppConfig::default()
        }
        None => {
            log::warn!("no config directory found, showing defaults");
            println!("# Could not determine config directory; using defaults");
            AppConfig::default()
        }
    };

    println!();
    print!("{}", render_effective(&config));
    Ok(())
}

/// Effective settings as `key = value` lines, escapes spelled back out.
fn render_effective(config: &AppConfig) -> String {
    let mut lines = vec![
        format!("reverse_search = {}", config.reverse_search),
        format!("case_sensitive = {}", config.case_sensitive),
    ];
    match &config.word_separators {
        Some(separators) => lines.push(format!("word_separators = \"{}\"", separators)),
        None => lines.push("# word_separators = (whitespace only)".to_string()),
    }
    lines.extend([
        format!("label_characters = {}", config.label_alphabet.as_string()),
        format!("highlight_colour = {}", spell_escapes(&config.highlight_colour)),
        format!("label_colour = {}", spell_escapes(&config.label_colour)),
        format!("prompt_colour = {}", spell_escapes(&config.prompt_colour)),
        format!("prompt_position = {}", config.prompt_position.as_str()),
        format!("prompt_indicator = {}", config.prompt_indicator),
        format!(
            "prompt_placeholder_text = \"{}\"",
            config.prompt_placeholder_text
        ),
        format!("auto_paste = {}", config.auto_paste),
        format!("idle_timeout = {}", config.idle_timeout_secs),
        format!("idle_warning = {}", config.idle_warning_secs),
        format!("debug = {}", config.debug),
    ]);
    if let Some(path) = &config.debug_log_file {
        lines.push(format!("debug_log_file = {}", path.display()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn spell_escapes(value: &str) -> String {
    value.replace('\x1b', "\\033")
}
