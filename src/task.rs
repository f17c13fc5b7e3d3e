//! Task data structure and related functionality.
//!
//! This module defines the `Task` record persisted to the data file and the
//! `TaskUpdate` used to edit one in place.

use serde::{Deserialize, Serialize};

use crate::fields::Status;

/// Text layout of `created_at`, in local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub status: Status,
    /// Set once at creation as [`TIMESTAMP_FORMAT`] text and kept verbatim
    /// after that, so records written by other tools load unchanged.
    pub created_at: String,
}

impl Task {
    pub fn is_complete(&self) -> bool {
        self.status == Status::Complete
    }
}

/// Field changes applied by [`crate::db::Database::edit`].
///
/// `None` leaves a field as it is. `category` holds a category table key
/// ("1".."10"), not a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.category.is_none()
    }
}
