//! Shared world state for task planner BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use eyre::eyre;
use mockable::Clock;
use rstest::fixture;
use task_planner::planner::{
    adapters::memory::InMemoryKeyValueStore,
    domain::{DateKey, Task},
    services::{CompletionAggregator, TaskStore},
};

/// Clock pinned to noon of the scenario's day.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioClock {
    now: DateTime<Local>,
}

impl ScenarioClock {
    /// Creates a clock reading noon of `day`.
    pub fn on(day: &str) -> Result<Self, eyre::Report> {
        let date = NaiveDate::parse_from_str(day, DateKey::FORMAT)?;
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| eyre!("invalid noon for {day}"))?;
        let now = Local
            .from_local_datetime(&noon)
            .single()
            .ok_or_else(|| eyre!("ambiguous local noon for {day}"))?;
        Ok(Self { now })
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

/// Store type used by the BDD world.
pub type PlannerStore = TaskStore<InMemoryKeyValueStore, ScenarioClock>;

/// Scenario world for task planner behaviour tests.
#[derive(Default)]
pub struct PlannerWorld {
    /// Storage shared across restarts.
    pub storage: InMemoryKeyValueStore,
    /// Clock of the running planner.
    pub clock: Option<ScenarioClock>,
    /// The running planner.
    pub store: Option<PlannerStore>,
    /// Completed view of the running planner.
    pub completed: Option<CompletionAggregator>,
    /// Task returned by the last removal.
    pub removed: Option<Task>,
}

impl PlannerWorld {
    /// Starts the planner over the world's storage.
    pub fn launch(&mut self, clock: ScenarioClock) {
        let store = TaskStore::new(Arc::new(self.storage.clone()), Arc::new(clock));
        self.completed = Some(CompletionAggregator::new(&store));
        self.store = Some(store);
        self.clock = Some(clock);
    }

    /// Stops the planner and starts it again over the same storage.
    pub fn restart(&mut self) -> Result<(), eyre::Report> {
        let clock = self
            .clock
            .ok_or_else(|| eyre!("planner has not been launched"))?;
        self.completed = None;
        self.store = None;
        self.launch(clock);
        Ok(())
    }

    /// Returns the running planner.
    pub fn store(&self) -> Result<&PlannerStore, eyre::Report> {
        self.store
            .as_ref()
            .ok_or_else(|| eyre!("planner has not been launched"))
    }

    /// Returns the completed view of the running planner.
    pub fn completed(&self) -> Result<&CompletionAggregator, eyre::Report> {
        self.completed
            .as_ref()
            .ok_or_else(|| eyre!("planner has not been launched"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PlannerWorld {
    PlannerWorld::default()
}

/// Parses a date key from step text.
pub fn date(value: &str) -> Result<DateKey, eyre::Report> {
    Ok(DateKey::new(value)?)
}
