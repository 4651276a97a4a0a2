//! The to-do task entity.

use super::{DateKey, TaskId};
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

/// A to-do item.
///
/// Identity is carried by [`TaskId`]: two tasks compare equal when their
/// identifiers match, whatever their content. Use
/// [`Task::has_same_content_as`] for a field-by-field comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default, deserialize_with = "deserialize_date")]
    date: Option<DateKey>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    time: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_completed: bool,
}

impl Task {
    /// Creates a new, unscheduled and uncompleted task with a fresh identifier.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            date: None,
            time: None,
            description: None,
            is_completed: false,
        }
    }

    /// Creates the blank task an "add task" screen starts from.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new())
    }

    /// Sets the scheduled date.
    #[must_use]
    pub fn with_date(mut self, date: DateKey) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the time of day.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.set_time(Some(time.into()));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the scheduled date, if any.
    #[must_use]
    pub const fn date(&self) -> Option<&DateKey> {
        self.date.as_ref()
    }

    /// Returns the time of day, if any.
    #[must_use]
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns whether the task belongs to a scheduled day.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.date.is_some()
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the time of day. Blank values clear it.
    pub fn set_time(&mut self, time: Option<String>) {
        self.time = time.filter(|value| !value.trim().is_empty());
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Moves the task onto the given day.
    pub(crate) fn schedule_on(&mut self, date: DateKey) {
        self.date = Some(date);
    }

    /// Clears the date and time so the task can live in the anytime list.
    pub(crate) fn unschedule(&mut self) {
        self.date = None;
        self.time = None;
    }

    pub(crate) const fn set_completed(&mut self, is_completed: bool) {
        self.is_completed = is_completed;
    }

    /// Compares every field, identifier included.
    #[must_use]
    pub fn has_same_content_as(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.date == other.date
            && self.time == other.time
            && self.description == other.description
            && self.is_completed == other.is_completed
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Reads a date that older data may store as an empty string.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| DateKey::new(value).ok()))
}

fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}
