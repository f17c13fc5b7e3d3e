//! Numbered main menu and its action handlers.
//!
//! The shell reads one menu choice per iteration, runs the matching action
//! against the [`Database`], then waits for Enter before redrawing. Input
//! and output are generic so the whole loop can be driven from a script.

use std::io::{BufRead, Write};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::fields::Status;
use crate::shell::colors::Palette;
use crate::shell::input::{non_blank, parse_id, Console};
use crate::shell::render::*;
use crate::task::TaskUpdate;

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Edit,
    Delete,
    Status,
    Statistics,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Edit),
            "4" => Some(MenuChoice::Delete),
            "5" => Some(MenuChoice::Status),
            "6" => Some(MenuChoice::Statistics),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu loop over a task database.
pub struct Shell<'a, R, W> {
    db: &'a mut Database,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(db: &'a mut Database, input: R, output: W, color: bool) -> Self {
        Shell {
            db,
            console: Console::new(input, output, Palette::new(color)),
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// Only storage and I/O failures escape; everything else is reported and
    /// the menu is shown again.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let palette = self.console.palette;
            render_menu(self.console.out(), &palette)?;
            let Some(choice) = self.console.prompt("\nChoose a menu option (1-7): ")? else {
                break;
            };

            let outcome = match MenuChoice::parse(&choice) {
                Some(choice) => self.dispatch(choice),
                None => Err(Error::InvalidInput("Invalid choice! Please choose 1-7.".into())),
            };
            let flow = match outcome {
                Ok(flow) => flow,
                Err(e) if e.is_recoverable() => {
                    self.console.error(&e.to_string())?;
                    Flow::Continue
                }
                Err(e) => return Err(e),
            };

            if flow == Flow::Exit || !self.console.pause()? {
                break;
            }
            writeln!(self.console.out(), "\n")?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::Add => self.add_task(),
            MenuChoice::List => {
                self.show_tasks()?;
                Ok(Flow::Continue)
            }
            MenuChoice::Edit => self.edit_task(),
            MenuChoice::Delete => self.delete_task(),
            MenuChoice::Status => self.change_status(),
            MenuChoice::Statistics => {
                let palette = self.console.palette;
                let stats = self.db.statistics();
                render_statistics(self.console.out(), &palette, &stats)?;
                Ok(Flow::Continue)
            }
            MenuChoice::Exit => {
                let palette = self.console.palette;
                render_farewell(self.console.out(), &palette)?;
                Ok(Flow::Exit)
            }
        }
    }

    fn show_tasks(&mut self) -> Result<()> {
        let palette = self.console.palette;
        render_task_list(self.console.out(), &palette, self.db.tasks())?;
        Ok(())
    }

    /// Prompt for a task ID. `None` means input ended.
    fn ask_id(&mut self, label: &str) -> Result<Option<u64>> {
        match self.console.prompt(label)? {
            Some(raw) => parse_id(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn add_task(&mut self) -> Result<Flow> {
        let rule = "─".repeat(60);
        let heading = self.console.palette.heading("➕ ADD NEW TASK");
        writeln!(self.console.out(), "\n{rule}\n{heading}\n{rule}")?;

        let Some(title) = self.console.prompt("Task title: ")? else {
            return Ok(Flow::Exit);
        };
        if title.is_empty() {
            return Err(Error::InvalidInput("Task title cannot be empty!".into()));
        }
        let Some(description) = self.console.prompt("Description (optional): ")? else {
            return Ok(Flow::Exit);
        };

        writeln!(self.console.out(), "\n📂 Choose a category:")?;
        let count = self.db.categories().len();
        render_categories(self.console.out(), self.db.categories(), None)?;
        let label = format!("\nCategory number (1-{count}) [default: 1]: ");
        let Some(key) = self.console.prompt(&label)? else {
            return Ok(Flow::Exit);
        };
        let category = self.db.categories().resolve_or_default(&key).to_string();

        let task = self.db.add(&title, &description, &category)?;
        let msg = format!("\n✅ Task '{}' added!\n", task.title);
        self.console.success(&msg)?;
        Ok(Flow::Continue)
    }

    fn edit_task(&mut self) -> Result<Flow> {
        self.show_tasks()?;
        let Some(id) = self.ask_id("Enter the ID of the task to edit: ")? else {
            return Ok(Flow::Exit);
        };
        let task = self.db.find(id)?.clone();

        writeln!(self.console.out(), "\n📝 Edit Task: {}", task.title)?;
        writeln!(self.console.out(), "(Press Enter to keep the current value)")?;
        writeln!(self.console.out(), "{}", "-".repeat(50))?;

        let Some(title) = self.console.prompt(&format!("Title ({}): ", task.title))? else {
            return Ok(Flow::Exit);
        };
        let current = if task.description.is_empty() { "Empty" } else { task.description.as_str() };
        let Some(description) = self.console.prompt(&format!("Description ({current}): "))? else {
            return Ok(Flow::Exit);
        };

        writeln!(self.console.out(), "\nAvailable categories:")?;
        render_categories(self.console.out(), self.db.categories(), Some(task.category.as_str()))?;
        let Some(key) = self.console.prompt(&format!("\nCategory ({}): ", task.category))? else {
            return Ok(Flow::Exit);
        };

        let update = TaskUpdate {
            title: non_blank(title),
            description: non_blank(description),
            category: non_blank(key),
        };
        self.db.edit(id, update)?;
        self.console.success("\n✅ Task updated!\n")?;
        Ok(Flow::Continue)
    }

    fn delete_task(&mut self) -> Result<Flow> {
        self.show_tasks()?;
        let Some(id) = self.ask_id("Enter the ID of the task to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(confirm) = self.console.prompt("⚠️  Are you sure you want to delete it? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        if confirm.to_lowercase() == "y" {
            let removed = self.db.delete(id)?;
            self.console.success(&format!("\n✅ Task '{}' deleted!\n", removed.title))?;
        } else {
            self.console.error("Deletion cancelled.\n")?;
        }
        Ok(Flow::Continue)
    }

    fn change_status(&mut self) -> Result<Flow> {
        self.show_tasks()?;
        let Some(id) = self.ask_id("Enter the task ID: ")? else {
            return Ok(Flow::Exit);
        };
        writeln!(self.console.out(), "\n1. ✅ Complete")?;
        writeln!(self.console.out(), "2. ⭕ Incomplete")?;
        let Some(choice) = self.console.prompt("Choose status (1-2): ")? else {
            return Ok(Flow::Exit);
        };
        let status = match choice.as_str() {
            "1" => Status::Complete,
            "2" => Status::Incomplete,
            _ => return Err(Error::InvalidInput("Invalid choice!".into())),
        };
        let task = self.db.update_status(id, status)?;
        let msg = format!("\n{} {}: task status updated!\n", task.status.glyph(), task.status);
        self.console.success(&msg)?;
        Ok(Flow::Continue)
    }
}
