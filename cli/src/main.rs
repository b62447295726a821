mod config;
mod logging;
mod report;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use swipedo_core::{levenshtein, time::today, TagSet};
use tracing::debug;

use crate::config::Config;
use crate::logging::LogTarget;

#[derive(Parser)]
#[command(name = "swipedo")]
#[command(about = "A single-screen in-memory to-do list", long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.swipedo/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the Terminal User Interface
    Tui,
    /// Show which due date would be suggested for a task text
    Suggest {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List the built-in tags matching a query, closest first
    Tags {
        query: Option<String>,
    },
    /// Print the edit distance between two strings
    Distance { a: String, b: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Tui) | None => {
            logging::init(&config, LogTarget::File)?;
            tui::run(config.completed_placement)?;
        }
        Some(Commands::Suggest { text }) => {
            logging::init(&config, LogTarget::Stderr)?;
            let text = text.join(" ");
            debug!(%text, "suggest");
            println!("{}", report::describe_suggestion(&text, today()));
        }
        Some(Commands::Tags { query }) => {
            logging::init(&config, LogTarget::Stderr)?;
            let query = query.unwrap_or_default();
            match report::tag_table(&TagSet::defaults(), &query) {
                Some(table) => println!("{}", table),
                None => println!("No tags match '{}'.", query),
            }
        }
        Some(Commands::Distance { a, b }) => {
            logging::init(&config, LogTarget::Stderr)?;
            println!("{}", levenshtein(&a, &b));
        }
    }
    Ok(())
}
