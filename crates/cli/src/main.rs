use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "flashcopy-cli")]
#[command(about = "Flashcopy configuration and search preview", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Show version information
    #[command(name = "-version")]
    Version,

    /// Show help and available actions
    #[command(name = "-help")]
    Help,

    /// Open config file in editor
    #[command(name = "-edit-config")]
    EditConfig,

    /// Display current configuration
    #[command(name = "-show-config")]
    ShowConfig,

    /// Validate configuration file
    #[command(name = "-validate-config")]
    ValidateConfig,

    /// Show the label alphabet, optionally narrowed for a query
    #[command(name = "-list-labels")]
    ListLabels {
        /// Query whose continuation characters are excluded
        #[arg(long)]
        query: Option<String>,

        /// Captured text to search (reads stdin when omitted)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Run one search and print labelled lines or JSON matches
    #[command(name = "-search")]
    Search {
        #[arg(long)]
        query: String,

        /// Captured text to search (reads stdin when omitted)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.action {
        Some(Action::Version) => {
            commands::version::run();
            Ok(())
        }
        Some(Action::Help) => {
            commands::help::run();
            Ok(())
        }
        Some(Action::EditConfig) => commands::edit_config::run(),
        Some(Action::ShowConfig) => commands::show_config::run(),
        Some(Action::ValidateConfig) => commands::validate_config::run(),
        Some(Action::ListLabels { query, file }) => {
            commands::list_labels::run(query.as_deref(), file.as_deref())
        }
        Some(Action::Search { query, file, json }) => {
            commands::search::run(&query, file.as_deref(), json)
        }
        None => {
            // No subcommand: show help
            commands::help::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
