use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::store::resolve_data_dir;

pub const DEFAULT_DUE_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoqConfig {
    /// Overrides the task file path (absolute, or relative to the data dir).
    pub data_file: Option<String>,
    /// Width of the "due soon" window in days.
    pub due_soon_days: Option<i64>,
}

pub fn config_path() -> Option<PathBuf> {
    resolve_data_dir().map(|dir| dir.join("config.toml"))
}

/// Best-effort: a missing or unparsable config behaves like no config.
pub fn load_config() -> Option<TodoqConfig> {
    let path = config_path()?;
    if !path.is_file() {
        return None;
    }
    let text = fs::read_to_string(path).ok()?;
    toml::from_str::<TodoqConfig>(&text).ok()
}

pub fn resolve_due_soon_days(config: Option<&TodoqConfig>) -> i64 {
    config
        .and_then(|config| config.due_soon_days)
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_DUE_SOON_DAYS)
}

pub fn resolve_data_file_override(config: Option<&TodoqConfig>) -> Option<PathBuf> {
    let value = config?.data_file.as_deref()?.trim();
    if value.is_empty() {
        return None;
    }
    let path = PathBuf::from(value);
    if path.is_absolute() {
        return Some(path);
    }
    resolve_data_dir().map(|dir| dir.join(path))
}
