pub mod cli;
pub mod config;
pub mod editor;
pub mod entity;
pub mod error;
pub mod planner;
pub mod storage;
pub mod transfer;

pub use entity::{ChecklistItem, GoalRecord, Review, Weekday};
pub use error::{GoalplanError, Result};
pub use planner::Planner;
pub use storage::{FileSlot, GoalStore, MemorySlot, Slot};
