//! Text rendering for the menu, task list, category picker and statistics.

use std::io::{self, Write};

use crate::db::{Statistics, BAR_WIDTH};
use crate::fields::CategoryTable;
use crate::shell::colors::{Palette, BAR};
use crate::task::Task;

const MENU_WIDTH: usize = 68;
const LIST_WIDTH: usize = 90;
const STATS_WIDTH: usize = 60;

const MENU_ITEMS: [&str; 7] = [
    "1. Add new task",
    "2. View all tasks",
    "3. Edit task",
    "4. Delete task",
    "5. Change task status",
    "6. View statistics",
    "7. Exit",
];

/// Draw the boxed main menu.
pub fn render_menu<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    let bar = "═".repeat(MENU_WIDTH);
    let title = palette.heading(&format!("{:^MENU_WIDTH$}", "TO-DO LIST MANAGER"));
    writeln!(out, "╔{bar}╗")?;
    writeln!(out, "║{title}║")?;
    writeln!(out, "╠{bar}╣")?;
    for item in MENU_ITEMS {
        writeln!(out, "║ {:<width$}║", item, width = MENU_WIDTH - 1)?;
    }
    writeln!(out, "╚{bar}╝")
}

/// Print every task, or an empty-state message.
pub fn render_task_list<W: Write>(out: &mut W, palette: &Palette, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(out, "\n📋 No tasks yet. Add a task first!\n")?;
        return Ok(());
    }

    let rule = "═".repeat(LIST_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "{}", palette.heading(&format!("{:^LIST_WIDTH$}", "📋 TASK LIST")))?;
    writeln!(out, "{rule}")?;
    for task in tasks {
        writeln!(out, "\n[ID: {:02}] {} {}", task.id, task.status.glyph(), task.title)?;
        writeln!(out, "   │ Category    : {}", task.category)?;
        writeln!(out, "   │ Status      : {}", task.status)?;
        if !task.description.is_empty() {
            writeln!(out, "   │ Description : {}", task.description)?;
        }
        writeln!(out, "   └─ Created    : {}", task.created_at)?;
    }
    writeln!(out, "\n{rule}\n")
}

/// List categories with their menu keys, marking `current` with an arrow.
pub fn render_categories<W: Write>(
    out: &mut W,
    categories: &CategoryTable,
    current: Option<&str>,
) -> io::Result<()> {
    for (key, name) in categories.iter() {
        let marker = if current == Some(name) { "→" } else { " " };
        writeln!(out, "  {marker} {key:>2}. {name}")?;
    }
    Ok(())
}

/// Filled and empty cells for a bar of `filled` out of [`BAR_WIDTH`].
pub fn progress_bar(filled: usize) -> (String, String) {
    let filled = filled.min(BAR_WIDTH);
    ("█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Print totals and the per-category bar chart.
pub fn render_statistics<W: Write>(
    out: &mut W,
    palette: &Palette,
    stats: &Statistics,
) -> io::Result<()> {
    if stats.total == 0 {
        writeln!(out, "\n📊 No tasks yet.\n")?;
        return Ok(());
    }

    let rule = "═".repeat(STATS_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "{}", palette.heading(&format!("{:^STATS_WIDTH$}", "📊 TASK STATISTICS")))?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Total tasks          : {}", stats.total)?;
    writeln!(out, "✅ Complete          : {}", stats.completed)?;
    writeln!(out, "⭕ Incomplete        : {}", stats.pending)?;
    writeln!(out, "Progress             : {:.1}% complete", stats.percentage)?;
    writeln!(out, "\n📂 Tasks per category:")?;
    writeln!(out, "{}", "-".repeat(STATS_WIDTH))?;
    for row in &stats.categories {
        let (filled, empty) = progress_bar(row.bar_len);
        writeln!(
            out,
            "  {:25} [{}{}] {}",
            row.category,
            palette.paint(&filled, BAR),
            empty,
            row.count
        )?;
    }
    writeln!(out, "{rule}\n")
}

/// Goodbye banner shown on exit.
pub fn render_farewell<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    let rule = "═".repeat(STATS_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(
        out,
        "{}",
        palette.heading(&format!("{:^STATS_WIDTH$}", "👋 Thanks for using the To-Do List Manager!"))
    )?;
    writeln!(out, "{:^STATS_WIDTH$}", "See you next time! 😊")?;
    writeln!(out, "{rule}\n")
}
