//! Goal lifecycle: bootstrap, add, delete with renumbering, import, and
//! routing edits through the store.

use std::path::Path;

use uuid::Uuid;

use crate::editor::Edit;
use crate::entity::{goal_title, GoalRecord};
use crate::error::{GoalplanError, Result};
use crate::storage::{GoalStore, Slot};
use crate::transfer;

/// What a delete request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Removed,
    /// The target is the protected goal; nothing changed.
    Protected,
    /// No goal has that id; nothing changed.
    Missing,
}

#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub status: DeleteStatus,
    /// The goal list after the request, renumbered if something was removed.
    pub goals: Vec<GoalRecord>,
}

/// Retitle every goal except the protected one as `"Goal N"` in list order.
///
/// Numbering starts at 2 when the protected goal is present (its slot is
/// never handed to another goal) and at 1 otherwise. Positions are kept.
pub fn renumber(goals: Vec<GoalRecord>) -> Vec<GoalRecord> {
    let has_protected = goals.iter().any(GoalRecord::is_protected);
    let mut next = if has_protected { 2 } else { 1 };

    goals
        .into_iter()
        .map(|mut goal| {
            if !goal.is_protected() {
                goal.title = goal_title(next);
                next += 1;
            }
            goal
        })
        .collect()
}

/// Which goal should be selected after `deleted` was removed.
///
/// The current selection survives unless it was the deleted goal, in which
/// case the first remaining goal is picked.
pub fn select_after_delete<'a>(
    current: Option<&Uuid>,
    deleted: &Uuid,
    goals: &'a [GoalRecord],
) -> Option<&'a GoalRecord> {
    match current {
        Some(id) if id != deleted => goals.iter().find(|g| g.id == *id).or_else(|| goals.first()),
        _ => goals.first(),
    }
}

pub struct Planner<S: Slot> {
    store: GoalStore<S>,
}

impl<S: Slot> Planner<S> {
    pub fn new(store: GoalStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &GoalStore<S> {
        &self.store
    }

    /// All goals, creating the protected "Goal 1" first if the store is empty.
    pub fn load(&self) -> Result<Vec<GoalRecord>> {
        let goals = self.store.get_all();
        if !goals.is_empty() {
            return Ok(goals);
        }

        let first = GoalRecord::new(Uuid::new_v4(), 1);
        tracing::info!(id = %first.id, "empty store, creating first goal");
        let stored = self.store.save(&first)?;
        Ok(vec![stored])
    }

    /// Create the next goal after the existing ones and save it.
    pub fn add_new(&self) -> Result<GoalRecord> {
        let count = self.load()?.len();
        let goal = GoalRecord::new(Uuid::new_v4(), count + 1);
        self.store.save(&goal)
    }

    /// Delete `id` and renumber the remaining goals.
    pub fn delete(&self, id: &Uuid) -> Result<DeleteOutcome> {
        let goals = self.store.get_all();

        let target = match goals.iter().find(|g| g.id == *id) {
            Some(target) => target,
            None => {
                tracing::warn!(%id, "no goal with this id, nothing deleted");
                return Ok(DeleteOutcome {
                    status: DeleteStatus::Missing,
                    goals,
                });
            }
        };

        if target.is_protected() {
            tracing::warn!(%id, title = %target.title, "refusing to delete protected goal");
            return Ok(DeleteOutcome {
                status: DeleteStatus::Protected,
                goals,
            });
        }

        let remaining: Vec<GoalRecord> = goals.into_iter().filter(|g| g.id != *id).collect();
        let renumbered = renumber(remaining);
        self.store.replace_all(&renumbered)?;
        tracing::debug!(%id, remaining = renumbered.len(), "deleted goal");

        Ok(DeleteOutcome {
            status: DeleteStatus::Removed,
            goals: renumbered,
        })
    }

    /// Save a whole replacement for an existing or new goal.
    pub fn update(&self, goal: &GoalRecord) -> Result<GoalRecord> {
        self.store.save(goal)
    }

    /// Apply `edit` to the stored goal `id` and save the result.
    pub fn edit(&self, id: &Uuid, edit: &Edit) -> Result<GoalRecord> {
        let goal = self
            .store
            .get(id)
            .ok_or_else(|| GoalplanError::GoalNotFound(id.to_string()))?;
        self.store.save(&edit.apply(&goal))
    }

    /// Import a goal file as a brand-new goal and save it.
    ///
    /// A second "Goal 1" is retitled as the next goal in sequence so only one
    /// protected goal ever exists. On failure nothing is written.
    pub fn import(&self, path: &Path) -> Result<GoalRecord> {
        let mut goal = transfer::import_from_path(path)?;
        let goals = self.store.get_all();
        if goal.is_protected() && goals.iter().any(GoalRecord::is_protected) {
            goal.title = goal_title(goals.len() + 1);
            tracing::info!(
                title = %goal.title,
                "imported goal would duplicate the protected goal, retitled"
            );
        }
        self.store.save(&goal)
    }

    /// Find a goal by sequence number (`"2"`), exact title, or id prefix.
    pub fn resolve(&self, reference: &str) -> Result<GoalRecord> {
        if reference.is_empty() {
            return Err(GoalplanError::GoalNotFound(reference.to_string()));
        }
        let goals = self.load()?;

        let by_sequence = reference
            .parse::<usize>()
            .ok()
            .and_then(|seq| goals.iter().find(|g| g.sequence_number() == Some(seq)));
        let found = by_sequence
            .or_else(|| goals.iter().find(|g| g.title == reference))
            .or_else(|| {
                let prefix = reference.to_lowercase();
                goals.iter().find(|g| g.id.to_string().starts_with(&prefix))
            });

        found
            .cloned()
            .ok_or_else(|| GoalplanError::GoalNotFound(reference.to_string()))
    }
}
