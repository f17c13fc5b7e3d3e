//! Task store: the in-memory task list and its JSON file.
//!
//! Every mutating operation rewrites the whole file before returning, so the
//! file always mirrors memory once an operation completes.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fields::{CategoryTable, Status};
use crate::task::{Task, TaskUpdate, TIMESTAMP_FORMAT};

/// Width of the per-category bar chart, in cells.
pub const BAR_WIDTH: usize = 30;

/// What happened when the data file was read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file yet; started empty.
    Missing,
    Loaded { count: usize },
    /// The file could not be read or parsed and was ignored.
    Discarded { reason: String },
}

/// Per-category line of the statistics report.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    pub count: usize,
    /// Filled cells out of [`BAR_WIDTH`], rounded down.
    pub bar_len: usize,
}

/// Completion summary over the current task list.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percent complete, unrounded; shown with one decimal place.
    pub percentage: f64,
    /// Categories present among tasks, sorted by name.
    pub categories: Vec<CategoryStat>,
}

/// In-memory task list bound to its data file.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    categories: CategoryTable,
    tasks: Vec<Task>,
    load_outcome: LoadOutcome,
}

impl Database {
    /// Load the task list named by `config`.
    ///
    /// Never fails: a missing file gives an empty list, and an unreadable or
    /// malformed one is discarded (see [`Database::load_outcome`]).
    pub fn load(config: &Config) -> Self {
        let path = config.data_file.clone();
        let (tasks, load_outcome) = read_tasks(&path);
        match &load_outcome {
            LoadOutcome::Missing => info!(path = %path.display(), "no task file, starting empty"),
            LoadOutcome::Loaded { count } => {
                info!(path = %path.display(), count, "loaded tasks")
            }
            LoadOutcome::Discarded { reason } => {
                warn!(path = %path.display(), %reason, "task file unusable, starting fresh")
            }
        }
        Database {
            path,
            categories: config.categories.clone(),
            tasks,
            load_outcome,
        }
    }

    /// Save the task list using an atomic write (temp file + rename).
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.tasks)?;
        let tmp = self.path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            let mut f = File::create(&tmp)?;
            f.write_all(data.as_bytes())?;
            f.flush()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|source| Error::StorageWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Like [`Database::get`], but a missing task is an error.
    pub fn find(&self, id: u64) -> Result<&Task> {
        self.get(id).ok_or(Error::NotFound(id))
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Create a task stamped with the current local time.
    pub fn add(&mut self, title: &str, description: &str, category: &str) -> Result<&Task> {
        let now = Local::now().naive_local();
        self.add_at(title, description, category, now)
    }

    /// Create a task with an explicit creation time.
    ///
    /// `category` is a category name; anything outside the table falls back
    /// to the default category.
    pub fn add_at(
        &mut self,
        title: &str,
        description: &str,
        category: &str,
        created_at: NaiveDateTime,
    ) -> Result<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("Task title cannot be empty!".into()));
        }
        let category = if self.categories.contains_name(category) {
            category.to_string()
        } else {
            self.categories.default_name().to_string()
        };
        let id = self.next_id();
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            description: description.trim().to_string(),
            category,
            status: Status::Incomplete,
            created_at: created_at.format(TIMESTAMP_FORMAT).to_string(),
        });
        self.save()?;
        info!(id, "added task");
        let idx = self.tasks.len() - 1;
        Ok(&self.tasks[idx])
    }

    /// Set a task's status.
    pub fn update_status(&mut self, id: u64, status: Status) -> Result<&Task> {
        let idx = self.position(id)?;
        self.tasks[idx].status = status;
        self.save()?;
        info!(id, status = %status, "updated status");
        Ok(&self.tasks[idx])
    }

    /// Set a task's status from its text form, rejecting anything but the
    /// two known values.
    pub fn update_status_str(&mut self, id: u64, status: &str) -> Result<&Task> {
        self.position(id)?;
        let status: Status = status.parse()?;
        self.update_status(id, status)
    }

    /// Apply `update` to a task; `None` fields are left untouched.
    ///
    /// An unknown category key is ignored rather than rejected.
    pub fn edit(&mut self, id: u64, update: TaskUpdate) -> Result<&Task> {
        let idx = self.position(id)?;
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("Task title cannot be empty!".into()));
            }
        }

        let category = match update.category.as_deref() {
            Some(key) => match self.categories.get(key) {
                Some(name) => Some(name.to_string()),
                None => {
                    debug!(id, key, "ignoring unknown category key");
                    None
                }
            },
            None => None,
        };

        let task = &mut self.tasks[idx];
        if let Some(title) = update.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(category) = category {
            task.category = category;
        }
        self.save()?;
        info!(id, "edited task");
        Ok(&self.tasks[idx])
    }

    /// Remove a task, keeping the order of the others.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let idx = self.position(id)?;
        let removed = self.tasks.remove(idx);
        self.save()?;
        info!(id, "deleted task");
        Ok(removed)
    }

    /// Completion totals and per-category counts.
    pub fn statistics(&self) -> Statistics {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.is_complete()).count();
        let percentage = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for t in &self.tasks {
            *counts.entry(t.category.as_str()).or_default() += 1;
        }
        let categories = counts
            .into_iter()
            .map(|(category, count)| CategoryStat {
                category: category.to_string(),
                count,
                bar_len: count * BAR_WIDTH / total,
            })
            .collect();

        Statistics {
            total,
            completed,
            pending: total - completed,
            percentage,
            categories,
        }
    }
}

fn read_tasks(path: &Path) -> (Vec<Task>, LoadOutcome) {
    if !path.exists() {
        return (Vec::new(), LoadOutcome::Missing);
    }
    let mut buf = String::new();
    if let Err(e) = File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
        return (Vec::new(), LoadOutcome::Discarded { reason: e.to_string() });
    }
    match serde_json::from_str::<Vec<Task>>(&buf) {
        Ok(tasks) => {
            let count = tasks.len();
            (tasks, LoadOutcome::Loaded { count })
        }
        Err(e) => (Vec::new(), LoadOutcome::Discarded { reason: e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Config) {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::new(dir.path().join("todo_data.json"));
        (dir, config)
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn ids(db: &Database) -> Vec<u64> {
        db.tasks().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let (_dir, config) = setup();
        let db = Database::load(&config);
        assert!(db.is_empty());
        assert_eq!(db.load_outcome(), &LoadOutcome::Missing);
        assert!(!config.data_file.exists());
    }

    #[test]
    fn test_round_trip_preserves_tasks_and_order() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        db.add_at("Kerjakan PR matematika", "halaman 12–14", "Homework", at(8, 0)).unwrap();
        db.add_at("Ulang tahun Ibu 🎂", "", "Birthday", at(9, 30)).unwrap();
        db.add_at("Mancing", "di danau", "Fishing Schedule", at(10, 15)).unwrap();
        db.update_status(2, Status::Complete).unwrap();

        let reloaded = Database::load(&config);
        assert_eq!(reloaded.load_outcome(), &LoadOutcome::Loaded { count: 3 });
        assert_eq!(reloaded.tasks(), db.tasks());
    }

    #[test]
    fn test_file_is_pretty_utf8_array() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        db.add_at("Café ☕", "", "Hangout", at(12, 0)).unwrap();

        let raw = fs::read_to_string(&config.data_file).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("Café ☕"));
        assert!(raw.contains("\n  {\n    \"id\": 1,"));
        assert!(raw.contains("\"created_at\": \"2024-05-01 12:00:00\""));
        assert!(!config.data_file.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_first_id_is_one() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        assert_eq!(db.next_id(), 1);
        let task = db.add("Buy milk", "", "Homework").unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.status, Status::Incomplete);
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        for title in ["a", "b", "c"] {
            db.add_at(title, "", "Homework", at(1, 0)).unwrap();
        }
        db.delete(2).unwrap();
        assert_eq!(ids(&db), vec![1, 3]);
        assert_eq!(db.add_at("d", "", "Homework", at(1, 0)).unwrap().id, 4);

        // Deleting the max lets its id be handed out again.
        db.delete(4).unwrap();
        assert_eq!(db.next_id(), 4);
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        let err = db.add("   ", "desc", "Homework").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(db.is_empty());
        assert!(!config.data_file.exists());
    }

    #[test]
    fn test_add_unknown_category_uses_default() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        let task = db.add("x", "", "Knitting").unwrap();
        assert_eq!(task.category, "School Assignment");
    }

    #[test]
    fn test_find() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        assert!(db.get(1).is_none());
        assert!(matches!(db.find(1), Err(Error::NotFound(1))));

        for title in ["a", "b", "c"] {
            db.add_at(title, "", "Homework", at(1, 0)).unwrap();
        }
        assert_eq!(db.find(2).unwrap().title, "b");
        assert_eq!(db.get(3).unwrap().title, "c");
        assert!(db.get(0).is_none());
        assert!(matches!(db.find(42), Err(Error::NotFound(42))));
    }

    #[test]
    fn test_update_status() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        db.add_at("a", "", "Homework", at(1, 0)).unwrap();

        assert!(db.update_status_str(1, "Complete").unwrap().is_complete());
        assert!(matches!(
            db.update_status(9, Status::Complete),
            Err(Error::NotFound(9))
        ));
        assert!(matches!(db.update_status_str(9, "Done"), Err(Error::NotFound(9))));

        let reloaded = Database::load(&config);
        assert_eq!(reloaded.get(1).unwrap().status, Status::Complete);
    }

    #[test]
    fn test_update_status_rejects_unknown_value() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        db.add_at("a", "", "Homework", at(1, 0)).unwrap();
        let before = db.get(1).unwrap().clone();

        for bad in ["Done", "complete", "", "Selesai!"] {
            let err = db.update_status_str(1, bad).unwrap_err();
            assert!(matches!(err, Error::InvalidStatus(_)), "{bad:?}");
        }
        assert_eq!(db.get(1).unwrap(), &before);
        assert_eq!(Database::load(&config).get(1).unwrap(), &before);
    }

    #[test]
    fn test_delete_preserves_order() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        for title in ["a", "b", "c", "d"] {
            db.add_at(title, "", "Homework", at(1, 0)).unwrap();
        }
        let removed = db.delete(2).unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(ids(&db), vec![1, 3, 4]);
        assert!(matches!(db.delete(2), Err(Error::NotFound(2))));
        assert_eq!(ids(&Database::load(&config)), vec![1, 3, 4]);
    }

    #[test]
    fn test_edit_single_field() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        db.add_at("Rapat OSIS", "ruang 3", "Student-Council Meeting", at(1, 0)).unwrap();
        let before = db.get(1).unwrap().clone();

        let update = TaskUpdate { description: Some("aula".into()), ..Default::default() };
        let after = db.edit(1, update).unwrap().clone();
        assert_eq!(after.description, "aula");
        assert_eq!(after.title, before.title);
        assert_eq!(after.category, before.category);
        assert_eq!(after.status, before.status);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_edit_category_by_key() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        db.add_at("a", "", "Homework", at(1, 0)).unwrap();

        let update = TaskUpdate { category: Some("10".into()), ..Default::default() };
        assert_eq!(db.edit(1, update).unwrap().category, "Hangout");

        let update = TaskUpdate { category: Some("99".into()), ..Default::default() };
        assert_eq!(db.edit(1, update).unwrap().category, "Hangout");
    }

    #[test]
    fn test_edit_errors() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        assert!(matches!(db.edit(1, TaskUpdate::default()), Err(Error::NotFound(1))));

        db.add_at("keep", "", "Homework", at(1, 0)).unwrap();
        let update = TaskUpdate {
            title: Some(" ".into()),
            description: Some("changed".into()),
            ..Default::default()
        };
        assert!(matches!(db.edit(1, update), Err(Error::InvalidInput(_))));
        assert_eq!(db.get(1).unwrap().title, "keep");
        assert_eq!(db.get(1).unwrap().description, "");
    }

    #[test]
    fn test_statistics_example() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        db.add_at("a1", "", "Homework", at(1, 0)).unwrap();
        db.add_at("b1", "", "Birthday", at(1, 0)).unwrap();
        db.add_at("a2", "", "Homework", at(1, 0)).unwrap();
        db.add_at("a3", "", "Homework", at(1, 0)).unwrap();
        db.update_status(1, Status::Complete).unwrap();
        db.update_status(2, Status::Complete).unwrap();

        let stats = db.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.percentage, 50.0);
        assert_eq!(
            stats.categories,
            vec![
                CategoryStat { category: "Birthday".into(), count: 1, bar_len: 7 },
                CategoryStat { category: "Homework".into(), count: 3, bar_len: 22 },
            ]
        );
    }

    #[test]
    fn test_statistics_empty_and_rounding() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        let empty = db.statistics();
        assert_eq!((empty.total, empty.completed, empty.pending), (0, 0, 0));
        assert_eq!(empty.percentage, 0.0);
        assert!(empty.categories.is_empty());

        for title in ["a", "b", "c"] {
            db.add_at(title, "", "Hangout", at(1, 0)).unwrap();
        }
        db.update_status(1, Status::Complete).unwrap();
        let stats = db.statistics();
        assert_eq!(format!("{:.1}", stats.percentage), "33.3");
        assert_eq!(stats.categories[0].bar_len, BAR_WIDTH);
    }

    #[test]
    fn test_percentage_half_rounds_to_even() {
        let (_dir, config) = setup();
        let mut db = Database::load(&config);
        for i in 0..16 {
            db.add_at(&format!("t{i}"), "", "Hangout", at(1, 0)).unwrap();
        }
        db.update_status(1, Status::Complete).unwrap();
        let stats = db.statistics();
        assert_eq!(stats.percentage, 6.25);
        assert_eq!(format!("{:.1}", stats.percentage), "6.2");
    }

    #[test]
    fn test_malformed_file_is_discarded() {
        let (_dir, config) = setup();
        fs::write(&config.data_file, "{ this is not json").unwrap();

        let db = Database::load(&config);
        assert!(db.is_empty());
        assert!(matches!(db.load_outcome(), LoadOutcome::Discarded { .. }));
        // The bad file is left alone until the next save.
        assert_eq!(fs::read_to_string(&config.data_file).unwrap(), "{ this is not json");
    }

    #[test]
    fn test_wrong_shape_is_discarded() {
        let (_dir, config) = setup();
        fs::write(&config.data_file, r#"[{"id": 1, "title": "x", "status": "Maybe"}]"#).unwrap();
        let db = Database::load(&config);
        assert!(db.is_empty());
        assert!(matches!(db.load_outcome(), LoadOutcome::Discarded { .. }));
    }

    #[test]
    fn test_odd_timestamp_does_not_discard_file() {
        let (_dir, config) = setup();
        let raw = r#"[
  {"id": 1, "title": "keep me", "description": "", "category": "Homework",
   "status": "Incomplete", "created_at": "2024-01-01 09:00:00"},
  {"id": 2, "title": "odd stamp", "description": "", "category": "Hangout",
   "status": "Complete", "created_at": "2024-01-01T10:00:00"}
]"#;
        fs::write(&config.data_file, raw).unwrap();

        let mut db = Database::load(&config);
        assert_eq!(db.load_outcome(), &LoadOutcome::Loaded { count: 2 });
        assert_eq!(db.get(2).unwrap().created_at, "2024-01-01T10:00:00");

        db.add_at("new", "", "Birthday", at(11, 0)).unwrap();
        let reloaded = Database::load(&config);
        let titles: Vec<&str> = reloaded.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["keep me", "odd stamp", "new"]);
        assert_eq!(reloaded.get(2).unwrap().created_at, "2024-01-01T10:00:00");
        assert_eq!(reloaded.get(3).unwrap().created_at, "2024-05-01 11:00:00");
    }

    #[test]
    fn test_loads_legacy_file_and_keeps_category() {
        let (_dir, config) = setup();
        let raw = r#"[
  {
    "id": 5,
    "title": "Nongkrong di kafe",
    "description": "",
    "category": "Nongkrong",
    "status": "Belum Selesai",
    "created_at": "2024-01-02 20:00:00"
  }
]"#;
        fs::write(&config.data_file, raw).unwrap();
        let mut db = Database::load(&config);
        assert_eq!(db.load_outcome(), &LoadOutcome::Loaded { count: 1 });
        assert_eq!(db.get(5).unwrap().category, "Nongkrong");
        assert_eq!(db.next_id(), 6);

        db.update_status(5, Status::Complete).unwrap();
        let raw = fs::read_to_string(&config.data_file).unwrap();
        assert!(raw.contains("\"status\": \"Complete\""));
        assert!(raw.contains("\"category\": \"Nongkrong\""));
    }

    #[test]
    fn test_separate_stores_do_not_interfere() {
        let (_dir_a, config_a) = setup();
        let (_dir_b, config_b) = setup();
        let mut a = Database::load(&config_a);
        let b = Database::load(&config_b);
        a.add("only in a", "", "Homework").unwrap();
        assert_eq!(a.tasks().len(), 1);
        assert!(b.is_empty());
        assert!(Database::load(&config_b).is_empty());
    }

    #[test]
    fn test_save_failure_is_storage_error() {
        let (dir, _) = setup();
        let config = Config::new(dir.path().join("missing_dir").join("todo_data.json"));
        let mut db = Database::load(&config);
        let err = db.add("x", "", "Homework").unwrap_err();
        assert!(matches!(err, Error::StorageWrite { .. }));
        assert!(!err.is_recoverable());
    }
}
