//! Task planner: the state engine behind a daily to-do application.
//!
//! The crate keeps a user's tasks in four partitions, open scheduled tasks
//! keyed by day, open "anytime" tasks and the completed counterpart of each,
//! publishes every partition as an observable value and writes each change
//! to a durable key-value store.
//!
//! # Architecture
//!
//! The planner follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (files, memory)
//!
//! # Modules
//!
//! - [`planner`]: Task model, task store, persistence and the completed view
//! - [`relay`]: Replay-latest observable values
//! - [`weather`]: Current-weather lookup shown beside the task list
//! - [`config`]: File-backed store configuration

pub mod config;
pub mod planner;
pub mod relay;
pub mod weather;
