//! Core domain logic for TidyList.
//! This crate is the single source of truth for task-list invariants:
//! ordering, mutation, persistence and reminder state all live here; the
//! presentation layer only observes snapshots and invokes operations.

pub mod db;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId};
pub use scheduler::notifier::{LogNotifier, Notifier, NotifyError};
pub use scheduler::reminder::{
    run_tick, run_tick_at, ReminderScheduler, SchedulerHandle, DEFAULT_TICK_INTERVAL,
};
pub use storage::slot_storage::{
    MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError, StorageResult,
};
pub use store::task_store::{ListSubscriber, StoreError, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
