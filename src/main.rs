mod capture;
mod overlay;

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use flashcopy_config::AppConfig;

use capture::Capture;
use overlay::{Outcome, Overlay};

/// Exit status when the payload was copied and should also be pasted.
const EXIT_PASTE: u8 = 10;
const EXIT_CANCELLED: u8 = 1;

#[derive(Parser)]
#[command(name = "flashcopy")]
#[command(about = "Search a captured pane and copy a labelled match", long_about = None)]
#[command(version)]
struct Args {
    /// Captured pane text (reads stdin when omitted)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the selected text here instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start with this query already typed
    #[arg(long, value_name = "TEXT")]
    query: Option<String>,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("flashcopy: {:#}", e);
            ExitCode::from(EXIT_CANCELLED)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_or_default(),
    };
    let debug = init_logging(&config)?;

    let capture = Capture::read(args.input.as_deref())?;
    let (_, height) = crossterm::terminal::size().context("failed to read terminal size")?;
    let capture = capture.tail(height.saturating_sub(1) as usize);

    let mut overlay = Overlay::new(&config, capture, debug)?;
    if let Some(query) = args.query.as_deref() {
        overlay = overlay.with_query(query)?;
    }

    match overlay.run()? {
        Outcome::Selected(selection) => {
            write_payload(&selection.text, args.output.as_deref())?;
            log::info!(
                "copied {} chars from line {} (paste: {})",
                selection.text.chars().count(),
                selection.line,
                selection.paste
            );
            if selection.paste {
                Ok(ExitCode::from(EXIT_PASTE))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Outcome::Cancelled => {
            log::debug!("cancelled");
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        Outcome::TimedOut => Ok(ExitCode::from(EXIT_CANCELLED)),
    }
}

/// Sets up `env_logger`. With `debug` on and a log file configured,
/// everything down to `debug` goes to that file and the prompt shows a
/// marker; the returned flag says whether that happened.
fn init_logging(config: &AppConfig) -> Result<bool> {
    if config.debug
        && let Some(path) = config.debug_log_file.as_deref()
    {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open debug log {}", path.display()))?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        log::debug!("flashcopy {} debug log", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    env_logger::init();
    Ok(false)
}

fn write_payload(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
