//! Library behind the `todo` binary.
//!
//! - `db`: the task store and its JSON file
//! - `task`, `fields`: task record, status and category table
//! - `shell`: the interactive menu, prompts and text rendering
//! - `cli`, `cmd`: clap front end and command handlers
//! - `config`, `error`: explicit configuration and error types

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod task;
pub mod shell {
    pub mod colors;
    pub mod input;
    pub mod menu;
    pub mod render;
}
