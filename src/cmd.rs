//! Command implementations for the CLI interface.
//!
//! The default command runs the interactive menu; `list` and `stats` print a
//! one-off report using the same rendering as the menu.

use std::io::{self, Write};

use clap::Subcommand;
use clap_complete::{generate, Shell as CompletionShell};

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::shell::colors::Palette;
use crate::shell::menu::Shell;
use crate::shell::render::{render_statistics, render_task_list};

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default).
    Menu,

    /// Print all tasks and exit.
    List,

    /// Print completion statistics and exit.
    Stats,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Run the interactive menu on stdin/stdout.
pub fn cmd_menu(config: &Config) -> Result<()> {
    let mut db = Database::load(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut db, stdin.lock(), stdout.lock(), config.color).run()
}

/// Print every task once.
pub fn cmd_list<W: Write>(db: &Database, out: &mut W, color: bool) -> Result<()> {
    render_task_list(out, &Palette::new(color), db.tasks())?;
    Ok(())
}

/// Print the statistics report once.
pub fn cmd_stats<W: Write>(db: &Database, out: &mut W, color: bool) -> Result<()> {
    render_statistics(out, &Palette::new(color), &db.statistics())?;
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: CompletionShell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;

    #[test]
    fn test_list_and_stats_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::new(dir.path().join("todo_data.json"));
        let mut db = Database::load(&config);
        db.add("Futsal", "lapangan B", "Sports Schedule").unwrap();
        db.add("Nonton", "", "Hangout").unwrap();
        db.update_status(2, Status::Complete).unwrap();

        let mut out = Vec::new();
        cmd_list(&db, &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[ID: 01] ⭕ Futsal"));
        assert!(text.contains("[ID: 02] ✅ Nonton"));

        let mut out = Vec::new();
        cmd_stats(&db, &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Progress             : 50.0% complete"));
        assert!(text.contains("Sports Schedule"));
    }
}
