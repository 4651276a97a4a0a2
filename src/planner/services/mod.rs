//! Application services of the task planner.

mod completion;
mod persistence;
mod store;

pub use completion::{CompletionAggregator, merge as merge_completed};
pub use persistence::{FIRST_LAUNCH_KEY, PartitionSnapshot, PersistenceError, TaskPersistence};
pub use store::{StoreOptions, TaskStore};
