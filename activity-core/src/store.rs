//! TaskStore — the single ordered container behind the activity list.
//!
//! Design:
//! - One `BTreeMap` keyed by `(due, seq)` owns every task. Iterating it gives
//!   the ascending-by-due listing, and its first entry is the nearest deadline.
//! - `seq` is a monotonically increasing insertion counter, so tasks with the
//!   same due time keep insertion order and every key is unique.
//! - A name index (`name -> set of keys`) makes remove-by-name O(log n). The
//!   first key in a name's set is the earliest-due task with that name.
//!
//! Invariant: `by_name` describes exactly the keys present in `tasks`.

use crate::task::Task;
use crate::time::DueDateTime;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No Activity Name in the Activity logger.")]
    Empty,

    #[error("Activity Name not found.")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct TaskKey {
    due: DueDateTime,
    seq: u64,
}

#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: BTreeMap<TaskKey, Task>,

    // name -> keys carrying that name, ascending
    by_name: HashMap<String, BTreeSet<TaskKey>>,

    seq: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Insert a new task in due order. Always succeeds; duplicate names are allowed.
    pub fn add(&mut self, name: impl Into<String>, due: DueDateTime) -> &Task {
        let task = Task::new(name, due);

        self.seq += 1;
        let key = TaskKey { due, seq: self.seq };

        self.by_name
            .entry(task.name.clone())
            .or_default()
            .insert(key);

        debug!(name = %task.name, %due, seq = key.seq, "task added");
        self.tasks.entry(key).or_insert(task)
    }

    /// Remove the earliest-due task named `name`.
    ///
    /// Exactly one task is removed even when several share the name.
    pub fn remove(&mut self, name: &str) -> Result<Task, StoreError> {
        if self.is_empty() {
            return Err(StoreError::Empty);
        }

        let not_found = || StoreError::NotFound(name.to_string());

        let keys = self.by_name.get_mut(name).ok_or_else(not_found)?;
        let key = keys.pop_first().ok_or_else(not_found)?;
        if keys.is_empty() {
            self.by_name.remove(name);
        }

        let task = self.tasks.remove(&key).ok_or_else(not_found)?;
        debug!(name, due = %task.due, remaining = self.tasks.len(), "task removed");
        Ok(task)
    }

    /// The earliest-due task named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Task> {
        let key = self.by_name.get(name)?.first()?;
        self.tasks.get(key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The task with the nearest deadline.
    pub fn next_due(&self) -> Option<&Task> {
        self.tasks.first_key_value().map(|(_, t)| t)
    }

    /// All tasks, ascending by due time (ties in insertion order).
    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_due_datetime;

    fn due(date: &str, time: &str) -> DueDateTime {
        parse_due_datetime(date, time)
    }

    fn names(store: &TaskStore) -> Vec<&str> {
        store.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn orders_by_full_timestamp_within_a_year() {
        let mut s = TaskStore::new();
        s.add("late-month", due("2024-11-01", "00:00"));
        s.add("same-day-later", due("2024-03-05", "18:30"));
        s.add("same-day-earlier", due("2024-03-05", "07:15"));
        s.add("prev-year", due("2023-12-31", "23:59"));

        assert_eq!(
            names(&s),
            vec!["prev-year", "same-day-earlier", "same-day-later", "late-month"]
        );
    }

    #[test]
    fn equal_due_keeps_insertion_order() {
        let mut s = TaskStore::new();
        let d = due("2024-06-01", "12:00");
        s.add("first", d);
        s.add("second", d);
        s.add("third", d);
        assert_eq!(names(&s), vec!["first", "second", "third"]);
    }

    #[test]
    fn remove_on_empty_store_reports_empty() {
        let mut s = TaskStore::new();
        assert_eq!(s.remove("anything"), Err(StoreError::Empty));
    }

    #[test]
    fn remove_unknown_name_leaves_store_untouched() {
        let mut s = TaskStore::new();
        s.add("Gym", due("2024-05-01", "10:00"));
        let before: Vec<Task> = s.iter().cloned().collect();

        let err = s.remove("Nonexistent").unwrap_err();
        assert_eq!(err, StoreError::NotFound("Nonexistent".to_string()));
        assert_eq!(err.to_string(), "Activity Name not found.");

        let after: Vec<Task> = s.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn remove_duplicate_takes_only_the_earliest() {
        let mut s = TaskStore::new();
        s.add("Call", due("2024-09-01", "09:00"));
        s.add("Other", due("2024-08-01", "09:00"));
        s.add("Call", due("2024-07-01", "09:00"));

        let removed = s.remove("Call").unwrap();
        assert_eq!(removed.due, due("2024-07-01", "09:00"));
        assert_eq!(s.len(), 2);
        assert_eq!(s.get("Call").map(|t| t.due), Some(due("2024-09-01", "09:00")));

        s.remove("Call").unwrap();
        assert!(!s.contains("Call"));
        assert_eq!(names(&s), vec!["Other"]);
    }

    #[test]
    fn next_due_tracks_removals() {
        let mut s = TaskStore::new();
        assert!(s.next_due().is_none());

        s.add("Gym", due("2024-05-01", "10:00"));
        s.add("Exam", due("2024-04-01", "09:00"));
        assert_eq!(s.next_due().map(|t| t.name.as_str()), Some("Exam"));

        s.remove("Exam").unwrap();
        assert_eq!(s.next_due().map(|t| t.name.as_str()), Some("Gym"));

        s.remove("Gym").unwrap();
        assert!(s.next_due().is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn name_index_stays_in_step_with_tasks() {
        let mut s = TaskStore::new();
        for (i, n) in ["a", "b", "a", "c", "a"].iter().enumerate() {
            s.add(*n, due("2024-01-01", &format!("{:02}:00", i)));
        }
        s.remove("a").unwrap();
        s.remove("c").unwrap();

        let indexed: usize = s.by_name.values().map(BTreeSet::len).sum();
        assert_eq!(indexed, s.len());
        for (key, task) in &s.tasks {
            assert!(s.by_name[&task.name].contains(key));
        }
    }
}
