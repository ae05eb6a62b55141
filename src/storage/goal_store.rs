use chrono::Utc;
use uuid::Uuid;

use super::Slot;
use crate::entity::GoalRecord;
use crate::error::Result;

/// The full goal list kept as one JSON array inside a [`Slot`].
///
/// Every mutation rewrites the whole array. Lists are small (one user, a few
/// dozen goals), so this stays cheap.
pub struct GoalStore<S: Slot> {
    slot: S,
}

impl<S: Slot> GoalStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// All goals in stored order.
    ///
    /// A missing or unreadable slot yields an empty list; the failure is
    /// logged rather than returned.
    pub fn get_all(&self) -> Vec<GoalRecord> {
        let contents = match self.slot.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to read goal list");
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(goals) => goals,
            Err(e) => {
                tracing::error!(error = %e, "failed to parse goal list");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<GoalRecord> {
        self.get_all().into_iter().find(|g| g.id == *id)
    }

    /// Insert or replace `goal` by id, stamping `last_modified`.
    ///
    /// An existing entry keeps its position. Returns the stored copy.
    pub fn save(&self, goal: &GoalRecord) -> Result<GoalRecord> {
        let mut goals = self.get_all();

        let mut stored = goal.clone();
        stored.last_modified = Utc::now();

        match goals.iter().position(|g| g.id == goal.id) {
            Some(index) => goals[index] = stored.clone(),
            None => goals.push(stored.clone()),
        }

        self.write_all(&goals)?;
        tracing::debug!(goal = %stored.title, id = %stored.id, "saved goal");
        Ok(stored)
    }

    /// Overwrite the stored list with `goals`.
    pub fn replace_all(&self, goals: &[GoalRecord]) -> Result<()> {
        self.write_all(goals)
    }

    fn write_all(&self, goals: &[GoalRecord]) -> Result<()> {
        let contents = serde_json::to_string(goals)?;
        if let Err(e) = self.slot.write(&contents) {
            tracing::error!(error = %e, "failed to write goal list");
            return Err(e);
        }
        Ok(())
    }
}
