//! The authoritative in-memory task store.

use crate::planner::{
    domain::{
        CompletionOrigin, DateKey, PartitionKey, ScheduledTasks, Section, Task, TaskId,
        TaskPosition,
    },
    ports::{KeyValueStore, TaskEditSink},
    services::persistence::{PartitionSnapshot, TaskPersistence},
};
use crate::relay::{Relay, Subscription};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Options controlling how a store bootstraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Seed example tasks the first time the application launches.
    pub seed_on_first_launch: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seed_on_first_launch: true,
        }
    }
}

/// Holds the four task partitions and the selected day.
///
/// Every partition is a [`Relay`]: callers read snapshots, subscribe to
/// changes, and mutate only through the store's operations. Each partition
/// change is written back through [`TaskPersistence`] exactly once.
pub struct TaskStore<S, C>
where
    S: KeyValueStore + 'static,
    C: Clock + Send + Sync,
{
    scheduled: Relay<ScheduledTasks>,
    anytime: Relay<Vec<Task>>,
    completed_scheduled: Relay<ScheduledTasks>,
    completed_anytime: Relay<Vec<Task>>,
    selected_date: Relay<DateKey>,
    persistence: TaskPersistence<S>,
    clock: Arc<C>,
    _autosave: Vec<Subscription>,
}

impl<S, C> TaskStore<S, C>
where
    S: KeyValueStore + 'static,
    C: Clock + Send + Sync,
{
    /// Opens a store over `store`, seeding it on first launch.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_options(store, clock, StoreOptions::default())
    }

    /// Opens a store over `store` with explicit bootstrap options.
    ///
    /// On a first launch the launch flag is recorded and the partitions are
    /// seeded (or left empty). Otherwise all four partitions are loaded, each
    /// falling back to empty when its stored document is missing or invalid.
    #[must_use]
    pub fn with_options(store: Arc<S>, clock: Arc<C>, options: StoreOptions) -> Self {
        let persistence = TaskPersistence::new(store);
        let today = DateKey::today(&*clock);

        let snapshot = if persistence.has_launched() {
            persistence.load_snapshot()
        } else {
            persistence.mark_launched();
            if options.seed_on_first_launch {
                seed_snapshot(&today)
            } else {
                PartitionSnapshot::default()
            }
        };

        let scheduled = Relay::new(snapshot.scheduled);
        let anytime = Relay::new(snapshot.anytime);
        let completed_scheduled = Relay::new(snapshot.completed_scheduled);
        let completed_anytime = Relay::new(snapshot.completed_anytime);

        let autosave = vec![
            autosave(&scheduled, PartitionKey::Scheduled, &persistence),
            autosave(&anytime, PartitionKey::Anytime, &persistence),
            autosave(
                &completed_scheduled,
                PartitionKey::CompletedScheduled,
                &persistence,
            ),
            autosave(
                &completed_anytime,
                PartitionKey::CompletedAnytime,
                &persistence,
            ),
        ];

        Self {
            scheduled,
            anytime,
            completed_scheduled,
            completed_anytime,
            selected_date: Relay::new(today),
            persistence,
            clock,
            _autosave: autosave,
        }
    }

    /// Inserts `task` into an open list.
    ///
    /// Scheduled tasks go to `date`, or to the selected date when `date` is
    /// absent, and take that date. Anytime tasks lose their date and time.
    /// `row` positions the task, shifting later rows down; rows past the end
    /// append. Inserting into an open list reopens a completed task.
    pub fn insert(
        &self,
        mut task: Task,
        section: Section,
        row: Option<usize>,
        date: Option<DateKey>,
    ) {
        task.set_completed(false);
        match section {
            Section::Scheduled => {
                let target = date.unwrap_or_else(|| self.selected_date());
                task.schedule_on(target.clone());
                self.scheduled.update(|scheduled| {
                    insert_at(scheduled.entry(target).or_default(), row, task);
                    true
                });
            }
            Section::Anytime => {
                task.unschedule();
                self.anytime.update(|tasks| {
                    insert_at(tasks, row, task);
                    true
                });
            }
        }
    }

    /// Removes and returns the task at `row` of an open list.
    ///
    /// Scheduled rows are read from `date`, or from the selected date when
    /// `date` is absent. Returns `None`, changing nothing, when the row does
    /// not exist.
    pub fn remove(&self, section: Section, row: usize, date: Option<DateKey>) -> Option<Task> {
        let mut removed = None;
        match section {
            Section::Scheduled => {
                let target = date.unwrap_or_else(|| self.selected_date());
                self.scheduled.update(|scheduled| {
                    removed = scheduled
                        .get_mut(&target)
                        .and_then(|tasks| take_at(tasks, row));
                    removed.is_some()
                });
            }
            Section::Anytime => {
                self.anytime.update(|tasks| {
                    removed = take_at(tasks, row);
                    removed.is_some()
                });
            }
        }
        if removed.is_none() {
            debug!(section = section.as_str(), row, "ignoring removal of a missing row");
        }
        removed
    }

    /// Moves a task between rows of the daily view.
    ///
    /// The task is removed from `from` and inserted at `to`, both resolved
    /// against the selected date. Returns `false`, changing nothing, when
    /// `from` does not exist.
    pub fn move_task(&self, from: TaskPosition, to: TaskPosition) -> bool {
        let Some(task) = self.remove(from.section, from.row, None) else {
            return false;
        };
        self.insert(task, to.section, Some(to.row), None);
        true
    }

    /// Toggles completion of the task at `row` of the origin's open list.
    ///
    /// A completed task moves to the end of the matching completed list (the
    /// same day for scheduled tasks). Returns the new completion state, or
    /// `None` when the row does not exist.
    pub fn change_complete(&self, origin: CompletionOrigin, row: usize) -> Option<bool> {
        let id = match origin.section() {
            Section::Scheduled => {
                let date = self.selected_date();
                self.scheduled.with_value(|scheduled| {
                    scheduled
                        .get(&date)
                        .and_then(|tasks| tasks.get(row))
                        .map(Task::id)
                })
            }
            Section::Anytime => self
                .anytime
                .with_value(|tasks| tasks.get(row).map(Task::id)),
        };
        let Some(found) = id else {
            debug!(?origin, row, "ignoring completion toggle of a missing row");
            return None;
        };
        self.change_complete_by_id(origin, found)
    }

    /// Toggles completion of the task identified by `id`.
    ///
    /// The task is looked up in the origin's open list first, then in its
    /// completed list. Tasks found in the completed list are matched by
    /// identifier, never by position, reopened and appended to the open list.
    /// Scheduled tasks are resolved on the selected date when it holds them,
    /// otherwise on whichever day does, so a task completed on another day
    /// returns to that day. Returns the new completion state, or `None` when
    /// no such task exists.
    pub fn change_complete_by_id(&self, origin: CompletionOrigin, id: TaskId) -> Option<bool> {
        match origin.section() {
            Section::Scheduled => {
                let selected = self.selected_date();
                let date = self.scheduled.with_value(|open| {
                    self.completed_scheduled
                        .with_value(|done| day_holding(open, done, &selected, id))
                })?;
                toggle_between(
                    &self.scheduled,
                    &self.completed_scheduled,
                    |days| days.entry(date.clone()).or_default(),
                    id,
                )
            }
            Section::Anytime => {
                toggle_between(&self.anytime, &self.completed_anytime, |tasks| tasks, id)
            }
        }
    }

    /// Focuses the daily view on `date`.
    pub fn set_selected_date(&self, date: DateKey) {
        self.selected_date.accept(date);
    }

    /// Focuses the daily view on today's date.
    pub fn select_today(&self) {
        self.set_selected_date(DateKey::today(&*self.clock));
    }

    /// Replaces the whole scheduled partition.
    pub fn replace_scheduled(&self, scheduled: ScheduledTasks) {
        self.scheduled.accept(scheduled);
    }

    /// Returns the open scheduled tasks.
    #[must_use]
    pub fn scheduled(&self) -> ScheduledTasks {
        self.scheduled.value()
    }

    /// Returns the open anytime tasks.
    #[must_use]
    pub fn anytime(&self) -> Vec<Task> {
        self.anytime.value()
    }

    /// Returns the completed scheduled tasks.
    #[must_use]
    pub fn completed_scheduled(&self) -> ScheduledTasks {
        self.completed_scheduled.value()
    }

    /// Returns the completed anytime tasks.
    #[must_use]
    pub fn completed_anytime(&self) -> Vec<Task> {
        self.completed_anytime.value()
    }

    /// Returns the selected date.
    #[must_use]
    pub fn selected_date(&self) -> DateKey {
        self.selected_date.value()
    }

    /// Returns the open tasks scheduled on `date`.
    #[must_use]
    pub fn tasks_for(&self, date: &DateKey) -> Vec<Task> {
        self.scheduled
            .with_value(|scheduled| scheduled.get(date).cloned().unwrap_or_default())
    }

    /// Returns the open tasks of the selected date.
    #[must_use]
    pub fn today_tasks(&self) -> Vec<Task> {
        self.tasks_for(&self.selected_date())
    }

    /// Returns the persistence adapter the store writes through.
    #[must_use]
    pub const fn persistence(&self) -> &TaskPersistence<S> {
        &self.persistence
    }

    /// Relay of the open scheduled tasks.
    #[must_use]
    pub const fn scheduled_relay(&self) -> &Relay<ScheduledTasks> {
        &self.scheduled
    }

    /// Relay of the open anytime tasks.
    #[must_use]
    pub const fn anytime_relay(&self) -> &Relay<Vec<Task>> {
        &self.anytime
    }

    /// Relay of the completed scheduled tasks.
    #[must_use]
    pub const fn completed_scheduled_relay(&self) -> &Relay<ScheduledTasks> {
        &self.completed_scheduled
    }

    /// Relay of the completed anytime tasks.
    #[must_use]
    pub const fn completed_anytime_relay(&self) -> &Relay<Vec<Task>> {
        &self.completed_anytime
    }

    /// Relay of the selected date.
    #[must_use]
    pub const fn selected_date_relay(&self) -> &Relay<DateKey> {
        &self.selected_date
    }

    /// Removes `id` from an open list, preferring `row` when it still holds
    /// that task.
    fn remove_matching(
        &self,
        section: Section,
        date: Option<DateKey>,
        row: usize,
        id: TaskId,
    ) -> Option<Task> {
        let mut removed = None;
        let mut take = |tasks: &mut Vec<Task>| {
            let index = if tasks.get(row).map(Task::id) == Some(id) {
                Some(row)
            } else {
                tasks.iter().position(|task| task.id() == id)
            };
            removed = index.and_then(|found| take_at(tasks, found));
            removed.is_some()
        };
        match section {
            Section::Scheduled => {
                let target = date.unwrap_or_else(|| self.selected_date());
                self.scheduled
                    .update(|scheduled| scheduled.get_mut(&target).is_some_and(&mut take));
            }
            Section::Anytime => {
                self.anytime.update(&mut take);
            }
        }
        removed
    }
}

impl<S, C> TaskEditSink for TaskStore<S, C>
where
    S: KeyValueStore + 'static,
    C: Clock + Send + Sync,
{
    /// Replaces the edited row, or adds a new task.
    ///
    /// The old task is removed from the list its own date designates; the new
    /// task goes to the list its date designates, at the same row when one
    /// is given.
    fn task_edited(&self, old_task: Option<&Task>, new_task: Task, position: Option<TaskPosition>) {
        if let (Some(old), Some(at)) = (old_task, position) {
            let section = Section::of(old);
            if self
                .remove_matching(section, old.date().cloned(), at.row, old.id())
                .is_none()
            {
                debug!(task = %old.id(), row = at.row, "edited task was no longer listed");
            }
        }

        let row = position.map(|at| at.row);
        let section = Section::of(&new_task);
        let date = new_task.date().cloned();
        self.insert(new_task, section, row, date);
    }

    fn schedule_changed(&self, scheduled: ScheduledTasks, new_date: DateKey) {
        if !scheduled.is_empty() {
            self.replace_scheduled(scheduled);
        }
        self.set_selected_date(new_date);
    }
}

/// Writes every value published by `relay` to the partition's key.
fn autosave<S, T>(
    relay: &Relay<T>,
    key: PartitionKey,
    persistence: &TaskPersistence<S>,
) -> Subscription
where
    S: KeyValueStore + 'static,
    T: Serialize + Clone + Send + Sync + 'static,
{
    let writer = persistence.clone();
    relay.subscribe(move |value| writer.save(key, value))
}

/// Example content shown on the very first launch.
fn seed_snapshot(today: &DateKey) -> PartitionSnapshot {
    let scheduled = Task::new("Create new task")
        .with_date(today.clone())
        .with_time("8:00 PM")
        .with_description("Add Some Future task notes");
    let anytime =
        Task::new("Update your task").with_description("This task has not yet been scheduled.");

    PartitionSnapshot {
        scheduled: ScheduledTasks::from([(today.clone(), vec![scheduled])]),
        anytime: vec![anytime],
        ..PartitionSnapshot::default()
    }
}

fn insert_at(tasks: &mut Vec<Task>, row: Option<usize>, task: Task) {
    match row {
        Some(index) => tasks.insert(index.min(tasks.len()), task),
        None => tasks.push(task),
    }
}

fn take_at(tasks: &mut Vec<Task>, row: usize) -> Option<Task> {
    (row < tasks.len()).then(|| tasks.remove(row))
}

/// Finds the day whose open or completed list holds `id`, trying `selected`
/// first.
fn day_holding(
    open: &ScheduledTasks,
    done: &ScheduledTasks,
    selected: &DateKey,
    id: TaskId,
) -> Option<DateKey> {
    let holds = |days: &ScheduledTasks, date: &DateKey| {
        days.get(date)
            .is_some_and(|tasks| tasks.iter().any(|task| task.id() == id))
    };
    if holds(open, selected) || holds(done, selected) {
        return Some(selected.clone());
    }
    open.keys()
        .chain(done.keys())
        .find(|date| holds(open, date) || holds(done, date))
        .cloned()
}

/// Toggles `id` between an open list and its completed counterpart.
///
/// `list` selects the affected list inside a partition. Each relay is updated
/// against its current value and the task leaves one list before it joins the
/// other, so subscribers reacting to the first change never see it twice.
fn toggle_between<P>(
    open: &Relay<P>,
    done: &Relay<P>,
    list: impl Fn(&mut P) -> &mut Vec<Task>,
    id: TaskId,
) -> Option<bool>
where
    P: Clone + Send + Sync + 'static,
{
    let listed = {
        let mut current = open.value();
        list(&mut current)
            .iter()
            .find(|task| task.id() == id)
            .map(Task::is_completed)
    };

    match listed {
        Some(false) => {
            let mut taken = None;
            open.update(|partition| {
                taken = take_id(list(partition), id);
                taken.is_some()
            });
            let mut task = taken?;
            task.set_completed(true);
            done.update(|partition| {
                list(partition).push(task);
                true
            });
            Some(true)
        }
        // An open task carrying a stale completed flag: drop any completed copy.
        Some(true) => {
            open.update(|partition| {
                let tasks = list(partition);
                let Some(mut task) = take_id(tasks, id) else {
                    return false;
                };
                task.set_completed(false);
                tasks.push(task);
                true
            });
            done.update(|partition| {
                let tasks = list(partition);
                let before = tasks.len();
                tasks.retain(|other| other.id() != id);
                tasks.len() != before
            });
            Some(false)
        }
        None => {
            let mut taken = None;
            done.update(|partition| {
                taken = take_id(list(partition), id);
                taken.is_some()
            });
            let mut task = taken?;
            task.set_completed(false);
            open.update(|partition| {
                list(partition).push(task);
                true
            });
            Some(false)
        }
    }
}

fn take_id(tasks: &mut Vec<Task>, id: TaskId) -> Option<Task> {
    let index = tasks.iter().position(|task| task.id() == id)?;
    take_at(tasks, index)
}
