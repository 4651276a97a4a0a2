//! Partition vocabulary shared by the store, its persistence and its callers.

use super::{DateKey, ParsePartitionKeyError, Task};
use std::collections::BTreeMap;
use std::fmt;

/// Tasks grouped by scheduled day, each list in display order.
pub type ScheduledTasks = BTreeMap<DateKey, Vec<Task>>;

/// The two editable lists shown on the daily view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Tasks of a scheduled day.
    Scheduled,
    /// Tasks without a date.
    Anytime,
}

impl Section {
    /// Returns the heading used for the section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Anytime => "Anytime",
        }
    }

    /// Returns the section a task belongs to according to its date.
    #[must_use]
    pub const fn of(task: &Task) -> Self {
        if task.is_scheduled() {
            Self::Scheduled
        } else {
            Self::Anytime
        }
    }
}

/// Which source list a completion toggle operates on.
///
/// `AllTasks` targets the scheduled tasks of the selected date and
/// `Completed` targets the anytime list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionOrigin {
    /// The scheduled tasks of the selected date.
    AllTasks,
    /// The anytime list.
    Completed,
}

impl CompletionOrigin {
    /// Returns the section whose list this origin toggles.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::AllTasks => Section::Scheduled,
            Self::Completed => Section::Anytime,
        }
    }
}

impl From<Section> for CompletionOrigin {
    fn from(section: Section) -> Self {
        match section {
            Section::Scheduled => Self::AllTasks,
            Section::Anytime => Self::Completed,
        }
    }
}

/// Durable storage slot of one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKey {
    /// Open scheduled tasks.
    Scheduled,
    /// Open anytime tasks.
    Anytime,
    /// Completed scheduled tasks.
    CompletedScheduled,
    /// Completed anytime tasks.
    CompletedAnytime,
}

impl PartitionKey {
    /// Every partition, in persistence order.
    pub const ALL: [Self; 4] = [
        Self::Scheduled,
        Self::Anytime,
        Self::CompletedScheduled,
        Self::CompletedAnytime,
    ];

    /// Returns the storage key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Anytime => "Anytime",
            Self::CompletedScheduled => "CompletedScheduled",
            Self::CompletedAnytime => "CompletedAnytime",
        }
    }

    /// Returns the partition holding open tasks of a section.
    #[must_use]
    pub const fn open(section: Section) -> Self {
        match section {
            Section::Scheduled => Self::Scheduled,
            Section::Anytime => Self::Anytime,
        }
    }

    /// Returns the partition holding completed tasks of a section.
    #[must_use]
    pub const fn completed(section: Section) -> Self {
        match section {
            Section::Scheduled => Self::CompletedScheduled,
            Section::Anytime => Self::CompletedAnytime,
        }
    }
}

impl TryFrom<&str> for PartitionKey {
    type Error = ParsePartitionKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value.trim())
            .ok_or_else(|| ParsePartitionKeyError(value.to_owned()))
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of a row on the daily view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskPosition {
    /// The list the row belongs to.
    pub section: Section,
    /// Zero-based row index within the list.
    pub row: usize,
}

impl TaskPosition {
    /// Creates a position.
    #[must_use]
    pub const fn new(section: Section, row: usize) -> Self {
        Self { section, row }
    }
}
