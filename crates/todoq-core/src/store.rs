use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::task::TaskStore;

const DATA_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse task file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not determine a home directory for the task file")]
    NoHome,
}

pub fn resolve_user_home_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    if let Ok(profile) = std::env::var("USERPROFILE") {
        let trimmed = profile.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    None
}

/// Data directory: `$TODOQ_HOME` when set, else `~/.todoq`.
pub fn resolve_data_dir() -> Option<PathBuf> {
    if let Ok(value) = std::env::var("TODOQ_HOME") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    resolve_user_home_dir().map(|home| home.join(".todoq"))
}

pub fn default_data_file() -> Result<PathBuf, StoreError> {
    resolve_data_dir()
        .map(|dir| dir.join(DATA_FILE_NAME))
        .ok_or(StoreError::NoHome)
}

/// Load the task store. A missing file is an empty store, not an error;
/// malformed JSON is.
pub fn load(path: &Path) -> Result<TaskStore, StoreError> {
    if !path.exists() {
        return Ok(TaskStore::new());
    }
    let raw = fs::read_to_string(path)?;
    let mut store: TaskStore = serde_json::from_str(&raw)?;
    store.normalize();
    Ok(store)
}

pub fn save(path: &Path, store: &TaskStore) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let raw = serde_json::to_string_pretty(store)?;
    fs::write(path, raw)?;
    Ok(())
}
