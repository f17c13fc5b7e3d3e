//! Enumerations and field types for task management.
//!
//! This module defines the task completion status and the closed table of
//! categories a task can be filed under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Task completion status.
///
/// Persisted as `"Complete"` / `"Incomplete"`. Files written by the older
/// Indonesian-language tool used `"Selesai"` / `"Belum Selesai"`; both are
/// accepted on load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    #[serde(alias = "Belum Selesai")]
    Incomplete,
    #[serde(alias = "Selesai")]
    Complete,
}

impl Status {
    /// Text used in listings and in the data file.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Incomplete => "Incomplete",
            Status::Complete => "Complete",
        }
    }

    /// Glyph shown next to a task title.
    pub fn glyph(self) -> &'static str {
        match self {
            Status::Complete => "✅",
            Status::Incomplete => "⭕",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Complete" | "Selesai" => Ok(Status::Complete),
            "Incomplete" | "Belum Selesai" => Ok(Status::Incomplete),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// The ten built-in categories, in menu order.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "School Assignment",
    "Homework",
    "Family Event",
    "Organization Agenda",
    "Birthday",
    "Student-Council Meeting",
    "Sports Schedule",
    "Other Important Day",
    "Fishing Schedule",
    "Hangout",
];

/// Ordered mapping from menu keys ("1", "2", ...) to category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<(String, String)>,
}

impl CategoryTable {
    /// Build a table from names; keys are assigned 1-based in order.
    ///
    /// Returns `None` for an empty list, since every table needs a default.
    pub fn from_names<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<(String, String)> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| ((i + 1).to_string(), name.into()))
            .collect();
        if entries.is_empty() {
            None
        } else {
            Some(CategoryTable { entries })
        }
    }

    /// Look up a category name by its menu key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.trim();
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, name)| name.as_str())
    }

    /// The category used when none (or an unknown one) is chosen.
    pub fn default_name(&self) -> &str {
        &self.entries[0].1
    }

    /// Resolve a menu key, falling back to the default category.
    pub fn resolve_or_default(&self, key: &str) -> &str {
        self.get(key).unwrap_or_else(|| self.default_name())
    }

    /// Whether `name` is one of the table's category names.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|(_, n)| n == name)
    }

    /// Iterate `(key, name)` pairs in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        CategoryTable {
            entries: DEFAULT_CATEGORIES
                .iter()
                .enumerate()
                .map(|(i, name)| ((i + 1).to_string(), name.to_string()))
                .collect(),
        }
    }
}
