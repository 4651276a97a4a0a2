//! Domain model for the task planner.
//!
//! Tasks live in one of four partitions: open scheduled tasks keyed by day,
//! open anytime tasks, and the completed counterpart of each. The types here
//! carry no storage or reactive concerns.

mod completed;
mod error;
mod ids;
mod partition;
mod task;

pub use completed::{CompletedOrigin, CompletedTask, CompletedView};
pub use error::{ParsePartitionKeyError, TaskDomainError};
pub use ids::{DateKey, TaskId};
pub use partition::{CompletionOrigin, PartitionKey, ScheduledTasks, Section, TaskPosition};
pub use task::Task;
