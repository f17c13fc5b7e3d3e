//! Runtime configuration.
//!
//! Everything the store and shell need to know about their environment is
//! carried here and passed in explicitly, so several stores can coexist.

use std::io::IsTerminal;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::fields::CategoryTable;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "todo_data.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file the task list is persisted to.
    pub data_file: PathBuf,
    pub categories: CategoryTable,
    /// Emit ANSI colours in shell output.
    pub color: bool,
}

impl Config {
    /// Plain configuration for `data_file`: built-in categories, no colour.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Config {
            data_file: data_file.into(),
            categories: CategoryTable::default(),
            color: false,
        }
    }

    pub fn with_categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Build configuration from parsed command-line arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let data_file = cli
            .db
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let color = !cli.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Config::new(data_file).with_color(color)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DATA_FILE)
    }
}
