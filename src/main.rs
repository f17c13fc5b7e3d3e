//! # todo - Interactive To-Do List Manager
//!
//! A menu-driven command-line task tracker. Tasks carry a title, optional
//! description, one of ten fixed categories, a completion status and a
//! creation timestamp.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive menu
//! todo
//!
//! # Use a different data file
//! todo --db ~/school_tasks.json
//!
//! # One-off reports
//! todo list
//! todo stats
//! ```
//!
//! ## Menu
//!
//! 1. Add a task (title, optional description, category number)
//! 2. View all tasks
//! 3. Edit a task (press Enter to keep a field)
//! 4. Delete a task (asks for confirmation)
//! 5. Mark a task Complete or Incomplete
//! 6. View statistics with a per-category bar chart
//! 7. Exit
//!
//! Tasks are stored as a pretty-printed JSON array in `todo_data.json` in the
//! working directory, rewritten after every change. A file that cannot be
//! parsed is ignored at startup and replaced on the next save.
//!
//! Set `RUST_LOG` (for example `RUST_LOG=todo_manager=debug`) to see diagnostic logs
//! on stderr.

use std::io;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use todo_manager::cli::Cli;
use todo_manager::cmd::*;
use todo_manager::config::Config;
use todo_manager::db::Database;

fn main() {
    // Logging is opt-in via RUST_LOG so the menu output stays clean.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd_menu(&config),
        Commands::List => cmd_list(&Database::load(&config), &mut io::stdout().lock(), config.color),
        Commands::Stats => cmd_stats(&Database::load(&config), &mut io::stdout().lock(), config.color),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
