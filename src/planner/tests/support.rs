//! Shared fixtures for planner unit tests.

use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::planner::{
    adapters::memory::InMemoryKeyValueStore,
    domain::{DateKey, PartitionKey, ScheduledTasks, Task},
    ports::{KeyValueResult, KeyValueStore},
    services::{FIRST_LAUNCH_KEY, TaskStore},
};

/// Clock pinned to noon of a fixed local day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let now = Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("noon is unambiguous");
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

/// Key-value store recording every key written, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    pub inner: InMemoryKeyValueStore,
    writes: Arc<Mutex<Vec<String>>>,
}

impl RecordingStore {
    pub fn over(inner: InMemoryKeyValueStore) -> Self {
        Self {
            inner,
            writes: Arc::default(),
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("writes lock").clone()
    }

    pub fn writes_to(&self, key: PartitionKey) -> usize {
        self.writes()
            .iter()
            .filter(|written| written.as_str() == key.as_str())
            .count()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().expect("writes lock").clear();
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) -> KeyValueResult<()> {
        self.writes.lock().expect("writes lock").push(key.to_owned());
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> KeyValueResult<()> {
        self.inner.remove(key)
    }
}

pub type TestStore = TaskStore<InMemoryKeyValueStore, FixedClock>;

pub const TODAY: &str = "2024-07-04";

pub fn date(value: &str) -> DateKey {
    DateKey::new(value).expect("valid date key")
}

#[fixture]
pub fn clock() -> FixedClock {
    FixedClock::on(2024, 7, 4)
}

/// A store that has launched before and holds nothing.
#[fixture]
pub fn launched_kv() -> InMemoryKeyValueStore {
    InMemoryKeyValueStore::with_entries([(FIRST_LAUNCH_KEY, "false")])
}

/// An empty store over a previously launched backend.
#[fixture]
pub fn store(launched_kv: InMemoryKeyValueStore, clock: FixedClock) -> TestStore {
    TaskStore::new(Arc::new(launched_kv), Arc::new(clock))
}

/// Decodes a stored scheduled partition.
pub fn stored_scheduled(kv: &InMemoryKeyValueStore, key: PartitionKey) -> ScheduledTasks {
    let raw = kv.get(key.as_str()).expect("readable").expect("stored");
    serde_json::from_str(&raw).expect("valid scheduled document")
}

/// Decodes a stored list partition.
pub fn stored_list(kv: &InMemoryKeyValueStore, key: PartitionKey) -> Vec<Task> {
    let raw = kv.get(key.as_str()).expect("readable").expect("stored");
    serde_json::from_str(&raw).expect("valid list document")
}

/// Counts how many partitions of `store` hold the task `id`.
pub fn occurrences(store: &TestStore, task: &Task) -> usize {
    let in_map = |map: &ScheduledTasks| {
        map.values()
            .flatten()
            .filter(|candidate| *candidate == task)
            .count()
    };
    let in_list = |list: &[Task]| list.iter().filter(|candidate| *candidate == task).count();

    in_map(&store.scheduled())
        + in_list(&store.anytime())
        + in_map(&store.completed_scheduled())
        + in_list(&store.completed_anytime())
}

/// Titles of a list, in order.
pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}

/// Runs `body` on its own thread, failing the test if it has not returned
/// within five seconds.
pub fn finishes_promptly<R: Send + 'static>(body: impl FnOnce() -> R + Send + 'static) -> R {
    let (done, finished) = mpsc::channel();
    thread::spawn(move || {
        done.send(body()).ok();
    });
    finished
        .recv_timeout(Duration::from_secs(5))
        .expect("store call returned without deadlocking")
}
