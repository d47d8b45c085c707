use anyhow::{Context, Result, bail};
use flashcopy_config::{config_path, validate_contents};

pub fn run() -> Result<()> {
    let path = config_path().context("Could not determine config directory")?;

    println!("Config file: {}", path.display());

    if !path.exists() {
        println!("Status: File does not exist (using defaults)");
        println!("Result: Valid");
        return Ok(());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let report = validate_contents(&contents);
    log::debug!(
        "{}: {} errors, {} warnings",
        path.display(),
        report.errors.len(),
        report.warnings.len()
    );

    if report.is_clean() {
        println!("Status: Valid");
        return Ok(());
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &report.errors {
            println!("  {}", error);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }

    println!();
    if report.is_valid() {
        println!("Result: Valid (with warnings)");
        Ok(())
    } else {
        println!("Result: Invalid");
        bail!("{} error(s) in {}", report.errors.len(), path.display())
    }
}
