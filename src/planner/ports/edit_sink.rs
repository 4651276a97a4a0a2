//! Callback contract of the screens that edit tasks or pick a date.

use crate::planner::domain::{DateKey, ScheduledTasks, Task, TaskPosition};

/// Receives the results of editing screens.
///
/// The add/edit screen and the calendar screen hold a reference to a sink and
/// call it synchronously when they finish.
pub trait TaskEditSink {
    /// An add or edit screen finished.
    ///
    /// `old_task` and `position` describe the row being edited and are absent
    /// for a brand new task.
    fn task_edited(&self, old_task: Option<&Task>, new_task: Task, position: Option<TaskPosition>);

    /// The calendar screen finished with a (possibly rearranged) schedule and
    /// a newly selected day.
    fn schedule_changed(&self, scheduled: ScheduledTasks, new_date: DateKey);
}
