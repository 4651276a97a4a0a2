//! Read-side types of the completed tasks view.

use super::{DateKey, Task};

/// Where a completed task came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompletedOrigin {
    /// Completed while scheduled on the given day.
    Scheduled(DateKey),
    /// Completed from the anytime list.
    Anytime,
}

/// A completed task tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTask {
    /// The completed task.
    pub task: Task,
    /// The partition the task was completed from.
    pub origin: CompletedOrigin,
}

/// Render-ready state of the completed tasks view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompletedView {
    /// Nothing has been completed; the view shows its empty-state message.
    #[default]
    Empty,
    /// Completed tasks, scheduled days first in date order, then anytime.
    Tasks(Vec<CompletedTask>),
}

impl CompletedView {
    /// Builds the view from merged entries, signalling emptiness explicitly.
    #[must_use]
    pub fn from_entries(entries: Vec<CompletedTask>) -> Self {
        if entries.is_empty() {
            Self::Empty
        } else {
            Self::Tasks(entries)
        }
    }

    /// Returns whether the view is in its empty state.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the entries, empty when the view is in its empty state.
    #[must_use]
    pub fn entries(&self) -> &[CompletedTask] {
        match self {
            Self::Empty => &[],
            Self::Tasks(entries) => entries,
        }
    }

    /// Returns the number of completed tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }
}
