//! Config file loading for flashcopy.
//!
//! All string coercion happens here; the search engine and the overlay only
//! ever see typed values.

mod escapes;
mod validate;

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use flashcopy_search::{IdleTimer, LabelAlphabet, SearchConfig, WordSeparators};
use flashcopy_terminal_ui::LineStyles;
use flashcopy_terminal_ui::ansi::DIM;

pub use escapes::decode_escapes;
pub use validate::{VALID_KEYS, ValidationReport, validate_contents};

const DEFAULT_HIGHLIGHT_COLOUR: &str = "\x1b[1;33m";
const DEFAULT_LABEL_COLOUR: &str = "\x1b[1;32m";
const DEFAULT_PROMPT_COLOUR: &str = "\x1b[1m";
const DEFAULT_PROMPT_INDICATOR: &str = ">";
const DEFAULT_PROMPT_PLACEHOLDER: &str = "search...";
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 15;
const DEFAULT_IDLE_WARNING_SECS: u64 = 5;
const MAX_IDLE_TIMEOUT_SECS: u64 = 3_600;

pub const DEFAULT_CONFIG: &str = "# Search settings\n\
# Label matches from the bottom of the pane upwards\n\
reverse_search = true\n\
# Match case exactly\n\
case_sensitive = false\n\
# Characters that end a copied word (quote to keep a leading space)\n\
# word_separators = \" ()\\\":,;<>~!@#$%^&*|+=[]{}?`'\"\n\
# Label characters, highest priority first\n\
# label_characters = asdfghjklqwertyuiopzxcvbnm\n\
\n\
# Appearance (escape sequences: \\033, \\e, \\x1b)\n\
highlight_colour = \\033[1;33m\n\
label_colour = \\033[1;32m\n\
prompt_colour = \\033[1m\n\
# Prompt bar position: top or bottom\n\
prompt_position = bottom\n\
prompt_indicator = >\n\
prompt_placeholder_text = search...\n\
\n\
# Behaviour\n\
# ';' or ':' before a label requests a paste after copying\n\
auto_paste = true\n\
# Seconds without input before the overlay closes, and warning lead time\n\
idle_timeout = 15\n\
idle_warning = 5\n\
# Write debug logs to debug_log_file\n\
# debug = false\n\
# debug_log_file = /tmp/flashcopy.log\n";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptPosition {
    Top,
    #[default]
    Bottom,
}

impl PromptPosition {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub reverse_search: bool,
    pub case_sensitive: bool,
    pub word_separators: Option<String>,
    pub label_alphabet: LabelAlphabet,
    pub highlight_colour: String,
    pub label_colour: String,
    pub prompt_colour: String,
    pub prompt_position: PromptPosition,
    pub prompt_indicator: String,
    pub prompt_placeholder_text: String,
    pub auto_paste: bool,
    pub idle_timeout_secs: u64,
    pub idle_warning_secs: u64,
    pub debug: bool,
    pub debug_log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reverse_search: true,
            case_sensitive: false,
            word_separators: None,
            label_alphabet: LabelAlphabet::default(),
            highlight_colour: DEFAULT_HIGHLIGHT_COLOUR.to_string(),
            label_colour: DEFAULT_LABEL_COLOUR.to_string(),
            prompt_colour: DEFAULT_PROMPT_COLOUR.to_string(),
            prompt_position: PromptPosition::default(),
            prompt_indicator: DEFAULT_PROMPT_INDICATOR.to_string(),
            prompt_placeholder_text: DEFAULT_PROMPT_PLACEHOLDER.to_string(),
            auto_paste: true,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            idle_warning_secs: DEFAULT_IDLE_WARNING_SECS,
            debug: false,
            debug_log_file: None,
        }
    }
}

impl AppConfig {
    /// Loads the user config, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_contents(&contents))
    }

    pub fn from_contents(contents: &str) -> Self {
        let mut config = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();

            if key.eq_ignore_ascii_case("reverse_search") {
                if let Some(reverse) = parse_bool(value) {
                    config.reverse_search = reverse;
                }
            }

            if key.eq_ignore_ascii_case("case_sensitive") {
                if let Some(case_sensitive) = parse_bool(value) {
                    config.case_sensitive = case_sensitive;
                }
            }

            if key.eq_ignore_ascii_case("word_separators") {
                config.word_separators = parse_raw_string_value(value).filter(|s| !s.is_empty());
            }

            if key.eq_ignore_ascii_case("label_characters") {
                if let Some(labels) = parse_raw_string_value(value) {
                    match LabelAlphabet::new(&labels) {
                        Ok(alphabet) => config.label_alphabet = alphabet,
                        Err(e) => log::warn!("ignoring label_characters: {}", e),
                    }
                }
            }

            if key.eq_ignore_ascii_case("highlight_colour")
                || key.eq_ignore_ascii_case("highlight_color")
            {
                if let Some(colour) = parse_string_value(value) {
                    config.highlight_colour = decode_escapes(&colour);
                }
            }

            if key.eq_ignore_ascii_case("label_colour") || key.eq_ignore_ascii_case("label_color") {
                if let Some(colour) = parse_string_value(value) {
                    config.label_colour = decode_escapes(&colour);
                }
            }

            if key.eq_ignore_ascii_case("prompt_colour") || key.eq_ignore_ascii_case("prompt_color")
            {
                if let Some(colour) = parse_string_value(value) {
                    config.prompt_colour = decode_escapes(&colour);
                }
            }

            if key.eq_ignore_ascii_case("prompt_position") {
                if let Some(position) = PromptPosition::from_str(value) {
                    config.prompt_position = position;
                }
            }

            if key.eq_ignore_ascii_case("prompt_indicator") {
                if let Some(indicator) = parse_string_value(value) {
                    config.prompt_indicator = indicator;
                }
            }

            if key.eq_ignore_ascii_case("prompt_placeholder_text") {
                if let Some(placeholder) = parse_raw_string_value(value) {
                    config.prompt_placeholder_text = placeholder;
                }
            }

            if key.eq_ignore_ascii_case("auto_paste") {
                if let Some(auto_paste) = parse_bool(value) {
                    config.auto_paste = auto_paste;
                }
            }

            if key.eq_ignore_ascii_case("idle_timeout") {
                if let Ok(timeout) = value.parse::<u64>() {
                    config.idle_timeout_secs = timeout.clamp(1, MAX_IDLE_TIMEOUT_SECS);
                }
            }

            if key.eq_ignore_ascii_case("idle_warning") {
                if let Ok(warning) = value.parse::<u64>() {
                    config.idle_warning_secs = warning.min(MAX_IDLE_TIMEOUT_SECS);
                }
            }

            if key.eq_ignore_ascii_case("debug") {
                if let Some(debug) = parse_bool(value) {
                    config.debug = debug;
                }
            }

            if key.eq_ignore_ascii_case("debug_log_file") {
                config.debug_log_file = parse_optional_string_value(value).map(PathBuf::from);
            }
        }

        config
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            case_sensitive: self.case_sensitive,
            reverse: self.reverse_search,
            alphabet: self.label_alphabet.clone(),
            word_separators: self
                .word_separators
                .as_deref()
                .map(WordSeparators::new)
                .unwrap_or_default(),
        }
    }

    pub fn line_styles(&self) -> LineStyles {
        LineStyles {
            dim: DIM.to_string(),
            highlight: self.highlight_colour.clone(),
            label: self.label_colour.clone(),
        }
    }

    pub fn idle_timer(&self) -> IdleTimer {
        IdleTimer::new(
            Duration::from_secs(self.idle_timeout_secs),
            Duration::from_secs(self.idle_warning_secs),
        )
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn unquote(value: &str) -> Option<&str> {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

fn parse_string_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unquoted = unquote(trimmed).unwrap_or(trimmed).trim();
    if unquoted.is_empty() {
        return None;
    }

    Some(unquoted.to_string())
}

/// Like `parse_string_value`, but quoted content is kept byte for byte, so
/// leading spaces and an explicit `""` survive.
pub(crate) fn parse_raw_string_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(unquote(trimmed).unwrap_or(trimmed).to_string())
}

fn parse_optional_string_value(value: &str) -> Option<String> {
    let parsed = parse_string_value(value)?;
    let normalized = parsed.trim().to_ascii_lowercase();
    if matches!(normalized.as_str(), "none" | "unset" | "default" | "off") {
        return None;
    }
    Some(parsed)
}

pub fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(dir) = dirs::config_dir() {
            return Some(dir.join("flashcopy").join("config.txt"));
        }
    }

    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.trim().is_empty()
    {
        return Some(Path::new(&xdg_config_home).join("flashcopy/config.txt"));
    }

    dirs::home_dir().map(|home| home.join(".config/flashcopy/config.txt"))
}

/// Writes the commented default config if no file exists yet.
pub fn ensure_config_file() -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    if !path.exists() {
        let io_error = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, DEFAULT_CONFIG).map_err(io_error)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DEFAULT_CONFIG, PromptPosition};
    use flashcopy_search::LabelAlphabet;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::from_contents("");
        assert!(config.reverse_search);
        assert!(!config.case_sensitive);
        assert!(config.word_separators.is_none());
        assert_eq!(config.label_alphabet, LabelAlphabet::default());
        assert_eq!(config.highlight_colour, "\x1b[1;33m");
        assert_eq!(config.label_colour, "\x1b[1;32m");
        assert_eq!(config.prompt_position, PromptPosition::Bottom);
        assert_eq!(config.prompt_indicator, ">");
        assert_eq!(config.prompt_placeholder_text, "search...");
        assert!(config.auto_paste);
        assert_eq!(config.idle_timeout_secs, 15);
        assert_eq!(config.idle_warning_secs, 5);
        assert!(!config.debug);
    }

    #[test]
    fn default_config_file_parses_to_defaults() {
        let config = AppConfig::from_contents(DEFAULT_CONFIG);
        let defaults = AppConfig::default();
        assert_eq!(config.highlight_colour, defaults.highlight_colour);
        assert_eq!(config.label_colour, defaults.label_colour);
        assert_eq!(config.prompt_colour, defaults.prompt_colour);
        assert_eq!(config.word_separators, None);
        assert_eq!(config.prompt_placeholder_text, "search...");
    }

    #[test]
    fn booleans_accept_tmux_style_values() {
        let config = AppConfig::from_contents(
            "reverse_search = off\n\
             case_sensitive = on\n\
             auto_paste = no\n\
             debug = 1\n",
        );
        assert!(!config.reverse_search);
        assert!(config.case_sensitive);
        assert!(!config.auto_paste);
        assert!(config.debug);

        let invalid = AppConfig::from_contents("case_sensitive = maybe\n");
        assert!(!invalid.case_sensitive);
    }

    #[test]
    fn quoted_word_separators_keep_leading_space() {
        let config =
            AppConfig::from_contents("word_separators = \" ()\":,;<>~!@#$%^&*|+=[]{}?`'\"\n");
        assert_eq!(
            config.word_separators.as_deref(),
            Some(" ()\":,;<>~!@#$%^&*|+=[]{}?`'")
        );
        let search = config.search_config();
        assert!(search.word_separators.is_separator('$'));
        assert!(!search.word_separators.is_separator('_'));
    }

    #[test]
    fn colours_are_decoded() {
        let config = AppConfig::from_contents(
            "highlight_colour = \\033[1;31m\n\
             label_color = \"\\e[4m\"\n",
        );
        assert_eq!(config.highlight_colour, "\x1b[1;31m");
        assert_eq!(config.label_colour, "\x1b[4m");
        let styles = config.line_styles();
        assert_eq!(styles.highlight, "\x1b[1;31m");
        assert_eq!(styles.label, "\x1b[4m");
    }

    #[test]
    fn label_characters_override_and_reject_empty() {
        let config = AppConfig::from_contents("label_characters = jkl;jk\n");
        assert_eq!(config.label_alphabet.as_string(), "jkl;");

        let empty = AppConfig::from_contents("label_characters = \"  \"\n");
        assert_eq!(empty.label_alphabet, LabelAlphabet::default());
    }

    #[test]
    fn idle_values_parse_and_clamp() {
        let config = AppConfig::from_contents("idle_timeout = 0\nidle_warning = 30\n");
        assert_eq!(config.idle_timeout_secs, 1);
        assert_eq!(config.idle_warning_secs, 30);

        let bad = AppConfig::from_contents("idle_timeout = soon\n");
        assert_eq!(bad.idle_timeout_secs, 15);
    }

    #[test]
    fn prompt_options_parse() {
        let config = AppConfig::from_contents(
            "prompt_position = TOP\n\
             prompt_indicator = \u{276f}\n\
             prompt_placeholder_text = \"\"\n",
        );
        assert_eq!(config.prompt_position, PromptPosition::Top);
        assert_eq!(config.prompt_indicator, "\u{276f}");
        assert_eq!(config.prompt_placeholder_text, "");
    }

    #[test]
    fn debug_log_file_can_be_unset() {
        let config = AppConfig::from_contents("debug_log_file = /tmp/fc.log\n");
        assert_eq!(
            config.debug_log_file.as_deref(),
            Some(std::path::Path::new("/tmp/fc.log"))
        );
        let unset = AppConfig::from_contents("debug_log_file = none\n");
        assert!(unset.debug_log_file.is_none());
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "case_sensitive = true").unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.case_sensitive);
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(matches!(
            AppConfig::load_from(&missing),
            Err(ConfigError::NotFound(_))
        ));
    }
}
