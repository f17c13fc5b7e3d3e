use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Interactive to-do list manager.
/// Storage defaults to ./todo_data.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "todo", version, about = "Interactive to-do list manager")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Disable coloured output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Defaults to the interactive menu.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
