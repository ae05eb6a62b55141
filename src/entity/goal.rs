// src/entity/goal.rs
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ChecklistItem, Review, Weekday};

/// Title of the record that can never be deleted.
pub const PROTECTED_TITLE: &str = "Goal 1";

/// Display title for the goal at a 1-based sequence position.
pub fn goal_title(sequence_number: usize) -> String {
    format!("Goal {}", sequence_number)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vision {
    pub dream: String,
    pub reasons: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemHabits {
    pub daily_routines: Vec<ChecklistItem>,
    pub behavior_rules: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Environment {
    pub selected_days: BTreeSet<Weekday>,
    pub preferred_time: String,
    pub obstacles: Vec<ChecklistItem>,
    pub essentials: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Feedback {
    pub weekly_reviews: Vec<Review>,
    pub monthly_reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Motivation {
    pub rewards: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Milestones {
    pub intermediate: Vec<ChecklistItem>,
    pub r#final: Vec<ChecklistItem>,
}

/// One planning document with all of its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub vision: Vision,
    #[serde(default)]
    pub system: SystemHabits,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub feedback: Feedback,
    #[serde(default)]
    pub motivation: Motivation,
    #[serde(default)]
    pub milestones: Milestones,
}

fn placeholder() -> Vec<ChecklistItem> {
    vec![ChecklistItem::new(1)]
}

impl GoalRecord {
    /// Build a fresh record titled after `sequence_number`.
    ///
    /// Every checklist starts with one empty row so there is always something
    /// to edit; review lists start empty.
    pub fn new(id: Uuid, sequence_number: usize) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: goal_title(sequence_number),
            created_at: now,
            last_modified: now,
            vision: Vision {
                dream: String::new(),
                reasons: placeholder(),
            },
            system: SystemHabits {
                daily_routines: placeholder(),
                behavior_rules: placeholder(),
            },
            environment: Environment {
                selected_days: BTreeSet::new(),
                preferred_time: String::new(),
                obstacles: placeholder(),
                essentials: placeholder(),
            },
            feedback: Feedback::default(),
            motivation: Motivation {
                rewards: placeholder(),
            },
            milestones: Milestones {
                intermediate: placeholder(),
                r#final: placeholder(),
            },
        }
    }

    pub fn is_protected(&self) -> bool {
        self.title == PROTECTED_TITLE
    }

    /// The `N` in a `"Goal N"` title, if the title follows that convention.
    pub fn sequence_number(&self) -> Option<usize> {
        self.title.strip_prefix("Goal ")?.parse().ok()
    }
}
