mod goal;
mod weekday;

pub use goal::{
    goal_title, Environment, Feedback, GoalRecord, Milestones, Motivation, SystemHabits, Vision,
    PROTECTED_TITLE,
};
pub use weekday::Weekday;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single editable row in a checklist section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            text: String::new(),
            checked: false,
        }
    }
}

/// A dated review entry in the feedback section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    /// ISO date (`YYYY-MM-DD`), empty until the user picks one
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub comment: String,
}

impl Review {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            date: String::new(),
            comment: String::new(),
        }
    }
}

/// Rows that carry a list-local id.
pub trait ListEntry {
    fn id(&self) -> u64;
}

impl ListEntry for ChecklistItem {
    fn id(&self) -> u64 {
        self.id
    }
}

impl ListEntry for Review {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Next free id in a list: one past the largest id present, 1 when empty.
///
/// When the largest id is `u64::MAX` the lowest unused id is taken instead.
pub fn next_id<T: ListEntry>(items: &[T]) -> u64 {
    match items.iter().map(|item| item.id()).max() {
        None => 1,
        Some(max) => max
            .checked_add(1)
            .unwrap_or_else(|| lowest_free_id(items)),
    }
}

fn lowest_free_id<T: ListEntry>(items: &[T]) -> u64 {
    let taken: BTreeSet<u64> = items.iter().map(|item| item.id()).collect();
    (1..=u64::MAX).find(|id| !taken.contains(id)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_empty_list() {
        let items: Vec<ChecklistItem> = Vec::new();
        assert_eq!(next_id(&items), 1);
    }

    #[test]
    fn test_next_id_skips_past_gaps() {
        let items = vec![ChecklistItem::new(1), ChecklistItem::new(7), ChecklistItem::new(3)];
        assert_eq!(next_id(&items), 8);
    }

    #[test]
    fn test_next_id_at_max_takes_lowest_free() {
        let items = vec![ChecklistItem::new(1), ChecklistItem::new(u64::MAX)];
        assert_eq!(next_id(&items), 2);

        let reviews = vec![Review::new(u64::MAX)];
        assert_eq!(next_id(&reviews), 1);
    }

    #[test]
    fn test_checked_defaults_when_missing() {
        let item: ChecklistItem = serde_json::from_str(r#"{"id":2,"text":"why"}"#).unwrap();
        assert_eq!(item.id, 2);
        assert!(!item.checked);
    }
}
