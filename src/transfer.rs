//! Single-goal export and import.
//!
//! An export file holds exactly one goal as 2-space indented JSON. Importing
//! never reuses the id found in the file, so an imported goal can't clobber
//! an existing one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::entity::GoalRecord;
use crate::error::{GoalplanError, Result};

/// Pretty-printed JSON for one goal.
pub fn export_to_string(goal: &GoalRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(goal)?)
}

/// `"{title}-{YYYY-MM-DD}.json"`, with path separators in the title replaced.
pub fn export_file_name(goal: &GoalRecord, date: NaiveDate) -> String {
    let title: String = goal
        .title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}-{}.json", title, date.format("%Y-%m-%d"))
}

/// Write `goal` into `dir` under today's export file name.
pub fn export_to_dir(goal: &GoalRecord, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(goal, Utc::now().date_naive()));
    fs::write(&path, export_to_string(goal)?)?;
    tracing::debug!(goal = %goal.title, path = %path.display(), "exported goal");
    Ok(path)
}

/// Parse an exported goal and give it a fresh id.
///
/// The id in the input is ignored entirely, so files with a missing or
/// malformed id still import.
pub fn import_from_str(contents: &str) -> Result<GoalRecord> {
    let mut value: Value =
        serde_json::from_str(contents).map_err(|e| GoalplanError::Import(e.to_string()))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| GoalplanError::Import("expected a single goal object".to_string()))?;
    object.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));

    serde_json::from_value(value).map_err(|e| GoalplanError::Import(e.to_string()))
}

/// Read `path` and import its contents.
pub fn import_from_path(path: &Path) -> Result<GoalRecord> {
    let contents = fs::read_to_string(path)
        .map_err(|e| GoalplanError::Import(format!("{}: {}", path.display(), e)))?;
    import_from_str(&contents)
}
