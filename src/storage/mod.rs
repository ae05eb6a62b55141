mod goal_store;
mod slot;

pub use goal_store::GoalStore;
pub use slot::{FileSlot, MemorySlot, Slot};
