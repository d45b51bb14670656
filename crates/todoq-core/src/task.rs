use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("invalid priority '{0}'; valid priorities are: low, normal, high")]
    InvalidPriority(String),
    #[error("invalid date '{0}'; use YYYY-MM-DD format")]
    InvalidDate(String),
    #[error("task with id {0} not found")]
    NotFound(u32),
}

/// Task priority. Ordering is `High > Normal > Low`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "normal" | "n" => Ok(Priority::Normal),
            "high" | "h" => Ok(Priority::High),
            _ => Err(TaskError::InvalidPriority(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

/// Parse a strict `YYYY-MM-DD` due date: the shape is checked before the
/// calendar, so `2026-1-5` and `2026-02-30` both fail.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TaskError> {
    let value = value.trim();
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("regex");
    if !re.is_match(value) {
        return Err(TaskError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| TaskError::InvalidDate(value.to_string()))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStore {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default = "default_next_id")]
    pub next_id: u32,
}

fn default_next_id() -> u32 {
    1
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Ids are never reused: `next_id` stays above every id seen so far,
    /// including ids from a hand-edited task file.
    pub fn normalize(&mut self) {
        let max_id = self.tasks.iter().map(|task| task.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }

    pub fn add(
        &mut self,
        description: &str,
        due_date: Option<NaiveDate>,
        priority: Priority,
    ) -> &Task {
        let task = Task {
            id: self.next_id,
            description: description.trim().to_string(),
            due_date,
            priority,
            completed: false,
        };
        self.next_id += 1;
        self.tasks.push(task);
        self.tasks.last().expect("just pushed")
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    pub fn set_completed(&mut self, id: u32, completed: bool) -> Result<(), TaskError> {
        self.get_mut(id)?.completed = completed;
        Ok(())
    }

    pub fn set_description(&mut self, id: u32, description: &str) -> Result<(), TaskError> {
        self.get_mut(id)?.description = description.trim().to_string();
        Ok(())
    }

    pub fn set_due_date(&mut self, id: u32, due_date: Option<NaiveDate>) -> Result<(), TaskError> {
        self.get_mut(id)?.due_date = due_date;
        Ok(())
    }

    pub fn set_priority(&mut self, id: u32, priority: Priority) -> Result<(), TaskError> {
        self.get_mut(id)?.priority = priority;
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<Task, TaskError> {
        let idx = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(idx))
    }

    /// Resolve a user-supplied identifier: a numeric id wins, otherwise the
    /// first case-insensitive substring match on descriptions.
    pub fn find(&self, identifier: &str) -> Option<&Task> {
        if let Ok(id) = identifier.trim().parse::<u32>() {
            return self.get(id);
        }
        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.tasks
            .iter()
            .find(|task| task.description.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
    }

    #[test]
    fn priority_parses_full_names_and_shortcuts() {
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("L".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("Normal".parse::<Priority>(), Ok(Priority::Normal));
        assert_eq!("n".parse::<Priority>(), Ok(Priority::Normal));
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("h".parse::<Priority>(), Ok(Priority::High));
        assert!(matches!(
            "urgent".parse::<Priority>(),
            Err(TaskError::InvalidPriority(_))
        ));
    }

    #[test]
    fn priority_orders_high_above_normal_above_low() {
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);
    }

    #[test]
    fn parse_due_date_requires_strict_format() {
        assert_eq!(parse_due_date("2026-08-27"), Ok(date("2026-08-27")));
        assert!(parse_due_date("2026-8-27").is_err());
        assert!(parse_due_date("27-08-2026").is_err());
        assert!(parse_due_date("2026-02-30").is_err());
        assert!(parse_due_date("soon").is_err());
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let mut store = TaskStore::new();
        let first = store.add("Buy milk", None, Priority::Normal).id;
        let second = store.add("Call dentist", None, Priority::High).id;
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.next_id, 3);
    }

    #[test]
    fn normalize_keeps_next_id_above_existing_ids() {
        let mut store = TaskStore {
            tasks: vec![Task {
                id: 7,
                description: "Imported".to_string(),
                due_date: None,
                priority: Priority::Normal,
                completed: false,
            }],
            next_id: 2,
        };
        store.normalize();
        assert_eq!(store.next_id, 8);
        assert_eq!(store.add("New", None, Priority::Normal).id, 8);
    }

    #[test]
    fn remove_returns_the_task_and_errors_when_missing() {
        let mut store = TaskStore::new();
        store.add("Buy milk", None, Priority::Normal);
        let removed = store.remove(1).expect("remove");
        assert_eq!(removed.description, "Buy milk");
        assert_eq!(store.remove(1), Err(TaskError::NotFound(1)));
    }

    #[test]
    fn find_prefers_numeric_id_over_name() {
        let mut store = TaskStore::new();
        store.add("task 2 review", None, Priority::Normal);
        store.add("pay rent", None, Priority::Normal);
        assert_eq!(store.find("2").map(|t| t.id), Some(2));
        assert_eq!(store.find("RENT").map(|t| t.id), Some(2));
        assert_eq!(store.find("groceries").map(|t| t.id), None);
    }

    #[test]
    fn task_json_round_trips_with_iso_due_date() {
        let task = Task {
            id: 3,
            description: "Submit report".to_string(),
            due_date: Some(date("2026-09-01")),
            priority: Priority::High,
            completed: false,
        };
        let raw = serde_json::to_string(&task).expect("serialize");
        assert!(raw.contains("\"2026-09-01\""));
        assert!(raw.contains("\"high\""));
        let back: Task = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, task);
    }
}
