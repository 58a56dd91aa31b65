//! Reminder scan and background ticker.
//!
//! # Responsibility
//! - Run the due scan: alert once per newly-due task, then latch it.
//! - Own the ticker thread and its explicit cancel handle.
//!
//! # Invariants
//! - Per-task state machine: pending (due set, not notified) -> fired,
//!   terminal. No re-arm, even when the due time is edited afterwards.
//! - A failed alert still latches the task; an unseen reminder is never
//!   retried.

use crate::scheduler::notifier::Notifier;
use crate::storage::slot_storage::SlotStorage;
use crate::store::task_store::TaskStore;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Cadence of the due scan. A tuning parameter, not a contract: reminders
/// may fire up to one interval late but never early.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

const REMINDER_TITLE: &str = "Task Reminder";

/// Runs one due scan against wall-clock time.
///
/// Returns the number of tasks fired this tick.
pub fn run_tick<S, N>(store: &mut TaskStore<S>, notifier: &N) -> usize
where
    S: SlotStorage,
    N: Notifier + ?Sized,
{
    run_tick_at(store, notifier, Utc::now())
}

/// Runs one due scan against an explicit `now`, for deterministic tests.
///
/// For every task with a due time at or before `now` that has not fired
/// yet: dispatch one alert carrying the task text, then latch the task via
/// the store so the transition persists and publishes.
pub fn run_tick_at<S, N>(store: &mut TaskStore<S>, notifier: &N, now: DateTime<Utc>) -> usize
where
    S: SlotStorage,
    N: Notifier + ?Sized,
{
    // The scan collects first: mark_notified mutates the store, and no
    // structural change happens here, so captured indices stay valid.
    let due: Vec<(usize, String)> = store
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, task)| task.is_due(now))
        .map(|(index, task)| (index, task.text.clone()))
        .collect();

    let mut fired = 0;
    for (index, text) in due {
        if let Err(err) = notifier.notify(REMINDER_TITLE, &format!("{text} is due now!")) {
            // Best-effort alert; the latch below still applies.
            warn!("event=reminder_alert module=scheduler status=error index={index} error={err}");
        }
        match store.mark_notified(index) {
            Ok(()) => {
                info!("event=reminder_fired module=scheduler status=ok index={index}");
                fired += 1;
            }
            Err(err) => {
                warn!(
                    "event=reminder_fired module=scheduler status=error index={index} error={err}"
                )
            }
        }
    }
    fired
}

/// Periodic due-scan runner over a shared store.
#[derive(Debug, Clone, Copy)]
pub struct ReminderScheduler {
    interval: Duration,
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl ReminderScheduler {
    /// Creates a scheduler with a custom tick interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Starts the ticker thread. Each tick locks the store, runs one due
    /// scan, and releases the lock before sleeping again.
    ///
    /// The returned handle is the only way to stop the ticker; dropping it
    /// also stops the thread.
    pub fn spawn<S, N>(self, store: Arc<Mutex<TaskStore<S>>>, notifier: N) -> SchedulerHandle
    where
        S: SlotStorage + Send + 'static,
        N: Notifier + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let interval = self.interval;

        let join = std::thread::spawn(move || {
            info!(
                "event=scheduler_start module=scheduler status=ok interval_ms={}",
                interval.as_millis()
            );
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let mut store = match store.lock() {
                            Ok(guard) => guard,
                            // A poisoned lock means a user-side panic; the
                            // list itself is still settled.
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        run_tick(&mut store, &notifier);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("event=scheduler_stop module=scheduler status=ok");
        });

        SchedulerHandle {
            stop_tx,
            join: Some(join),
        }
    }
}

/// Explicit cancel handle for the ticker thread.
///
/// Released at process teardown; cancelling twice is harmless.
pub struct SchedulerHandle {
    stop_tx: mpsc::Sender<()>,
    join: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Stops the ticker promptly and waits for the thread to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
