//! Read-side projection of completed tasks.

use crate::planner::{
    domain::{CompletedOrigin, CompletedTask, CompletedView, ScheduledTasks, Task},
    ports::KeyValueStore,
    services::store::TaskStore,
};
use crate::relay::{Relay, Subscription};
use mockable::Clock;

/// Merges the completed partitions into one render-ready view.
///
/// The view is recomputed whenever either completed partition changes and
/// published on [`CompletionAggregator::relay`]. Dropping the aggregator
/// stops the projection.
pub struct CompletionAggregator {
    view: Relay<CompletedView>,
    _sources: [Subscription; 2],
}

impl CompletionAggregator {
    /// Projects the completed partitions of `store`.
    #[must_use]
    pub fn new<S, C>(store: &TaskStore<S, C>) -> Self
    where
        S: KeyValueStore + 'static,
        C: Clock + Send + Sync,
    {
        Self::from_relays(
            store.completed_scheduled_relay(),
            store.completed_anytime_relay(),
        )
    }

    /// Projects an arbitrary pair of completed partitions.
    #[must_use]
    pub fn from_relays(
        completed_scheduled: &Relay<ScheduledTasks>,
        completed_anytime: &Relay<Vec<Task>>,
    ) -> Self {
        let view = Relay::new(merge(
            &completed_scheduled.value(),
            &completed_anytime.value(),
        ));

        let on_scheduled = {
            let output = view.clone();
            let anytime = completed_anytime.clone();
            completed_scheduled.subscribe_changes(move |scheduled| {
                output.accept(anytime.with_value(|tasks| merge(scheduled, tasks)));
            })
        };
        let on_anytime = {
            let output = view.clone();
            let scheduled = completed_scheduled.clone();
            completed_anytime.subscribe_changes(move |tasks| {
                output.accept(scheduled.with_value(|map| merge(map, tasks)));
            })
        };

        Self {
            view,
            _sources: [on_scheduled, on_anytime],
        }
    }

    /// Returns the current view.
    #[must_use]
    pub fn view(&self) -> CompletedView {
        self.view.value()
    }

    /// Relay publishing every recomputed view.
    #[must_use]
    pub const fn relay(&self) -> &Relay<CompletedView> {
        &self.view
    }
}

/// Flattens scheduled days in key order, then the anytime list, keeping only
/// tasks flagged as completed.
#[must_use]
pub fn merge(completed_scheduled: &ScheduledTasks, completed_anytime: &[Task]) -> CompletedView {
    let scheduled = completed_scheduled.iter().flat_map(|(date, tasks)| {
        tasks.iter().map(move |task| CompletedTask {
            task: task.clone(),
            origin: CompletedOrigin::Scheduled(date.clone()),
        })
    });
    let anytime = completed_anytime.iter().map(|task| CompletedTask {
        task: task.clone(),
        origin: CompletedOrigin::Anytime,
    });

    CompletedView::from_entries(
        scheduled
            .chain(anytime)
            .filter(|entry| entry.task.is_completed())
            .collect(),
    )
}
