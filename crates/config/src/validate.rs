use crate::{PromptPosition, decode_escapes, parse_bool, parse_raw_string_value};
use flashcopy_search::LabelAlphabet;

pub const VALID_KEYS: &[&str] = &[
    "reverse_search",
    "case_sensitive",
    "word_separators",
    "label_characters",
    "highlight_colour",
    "highlight_color",
    "label_colour",
    "label_color",
    "prompt_colour",
    "prompt_color",
    "prompt_position",
    "prompt_indicator",
    "prompt_placeholder_text",
    "auto_paste",
    "idle_timeout",
    "idle_warning",
    "debug",
    "debug_log_file",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Checks config text line by line. Unknown keys are warnings; values the
/// loader would silently ignore are errors.
pub fn validate_contents(contents: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut idle_timeout = None;
    let mut idle_warning = None;

    for (line_num, line) in contents.lines().enumerate() {
        let line_num = line_num + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            report.errors.push(format!(
                "Line {}: Invalid syntax. Expected 'key = value'",
                line_num
            ));
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();

        if !VALID_KEYS.contains(&key.as_str()) {
            report
                .warnings
                .push(format!("Line {}: Unknown key '{}'", line_num, key));
            continue;
        }

        match key.as_str() {
            "reverse_search" | "case_sensitive" | "auto_paste" | "debug" => {
                if parse_bool(value).is_none() {
                    report.errors.push(format!(
                        "Line {}: {} must be true/false, yes/no, on/off or 1/0",
                        line_num, key
                    ));
                }
            }
            "idle_timeout" | "idle_warning" => match value.parse::<u64>() {
                Ok(secs) => {
                    if key == "idle_timeout" {
                        if secs == 0 {
                            report.warnings.push(format!(
                                "Line {}: idle_timeout of 0 is raised to 1 second",
                                line_num
                            ));
                        }
                        idle_timeout = Some((line_num, secs));
                    } else {
                        idle_warning = Some((line_num, secs));
                    }
                }
                Err(_) => report.errors.push(format!(
                    "Line {}: {} must be a whole number of seconds",
                    line_num, key
                )),
            },
            "prompt_position" => {
                if PromptPosition::from_str(value).is_none() {
                    report.errors.push(format!(
                        "Line {}: prompt_position must be 'top' or 'bottom'",
                        line_num
                    ));
                }
            }
            "label_characters" => {
                let labels = parse_raw_string_value(value).unwrap_or_default();
                if LabelAlphabet::new(&labels).is_err() {
                    report.errors.push(format!(
                        "Line {}: label_characters must contain at least one printable character",
                        line_num
                    ));
                }
            }
            "highlight_colour" | "highlight_color" | "label_colour" | "label_color"
            | "prompt_colour" | "prompt_color" => {
                if !decode_escapes(value).contains('\x1b') {
                    report.warnings.push(format!(
                        "Line {}: {} has no escape character; use \\033[...m",
                        line_num, key
                    ));
                }
            }
            _ => {}
        }
    }

    if let (Some((_, timeout)), Some((line_num, warning))) = (idle_timeout, idle_warning)
        && warning >= timeout
    {
        report.warnings.push(format!(
            "Line {}: idle_warning ({}) must be below idle_timeout ({}) to show",
            line_num, warning, timeout
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::validate_contents;
    use crate::DEFAULT_CONFIG;

    #[test]
    fn default_config_is_clean() {
        let report = validate_contents(DEFAULT_CONFIG);
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn unknown_keys_are_warnings() {
        let report = validate_contents("theme = dark\n");
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec!["Line 1: Unknown key 'theme'"]);
    }

    #[test]
    fn bad_values_are_errors() {
        let report = validate_contents(
            "reverse_search = sometimes\n\
             idle_timeout = soon\n\
             prompt_position = left\n\
             label_characters = \"\"\n\
             not a pair\n",
        );
        assert_eq!(report.errors.len(), 5);
        assert!(report.errors[0].starts_with("Line 1:"));
        assert!(report.errors[4].contains("Invalid syntax"));
    }

    #[test]
    fn warning_longer_than_timeout_is_flagged() {
        let report = validate_contents("idle_timeout = 5\nidle_warning = 10\n");
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Line 2:"));
    }

    #[test]
    fn colour_without_escape_is_a_warning() {
        let report = validate_contents("label_colour = [1;32m\n");
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }
}
