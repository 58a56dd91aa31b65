use chrono::{Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tidylist_core::{
    run_tick, run_tick_at, MemorySlotStorage, Notifier, NotifyError, ReminderScheduler, TaskStore,
};

/// Capturing notifier; optionally simulates an unavailable channel.
struct RecordingNotifier {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    available: bool,
}

impl RecordingNotifier {
    fn new() -> (Self, Arc<Mutex<Vec<(String, String)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: Arc::clone(&calls),
                available: true,
            },
            calls,
        )
    }

    fn unavailable() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            available: false,
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        if !self.available {
            return Err(NotifyError::Unavailable);
        }
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

#[test]
fn due_task_fires_exactly_one_alert_and_latches() {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("Buy milk", "Personal", Some(now - Duration::seconds(1)));

    let (notifier, calls) = RecordingNotifier::new();
    let fired = run_tick_at(&mut store, &notifier, now);

    assert_eq!(fired, 1);
    assert!(store.tasks()[0].notified);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.contains("Buy milk"));
}

#[test]
fn reminders_never_fire_before_the_due_time() {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("future", "", Some(now + Duration::minutes(1)));
    store.add_task("undated", "", None);

    let (notifier, calls) = RecordingNotifier::new();
    let fired = run_tick_at(&mut store, &notifier, now);

    assert_eq!(fired, 0);
    assert!(calls.lock().unwrap().is_empty());
    assert!(!store.tasks()[0].notified);
}

#[test]
fn second_tick_does_not_repeat_a_fired_reminder() {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("once only", "", Some(now - Duration::minutes(5)));

    let (notifier, calls) = RecordingNotifier::new();
    run_tick_at(&mut store, &notifier, now);
    let fired_again = run_tick_at(&mut store, &notifier, now + Duration::minutes(1));

    assert_eq!(fired_again, 0);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn editing_a_fired_tasks_due_date_does_not_re_arm_it() {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("no re-arm", "", Some(now - Duration::seconds(1)));

    let (notifier, calls) = RecordingNotifier::new();
    run_tick_at(&mut store, &notifier, now);
    assert!(store.tasks()[0].notified);

    // Move the due time into the future; the latch must hold.
    store
        .edit_due_date(0, Some(now + Duration::minutes(10)))
        .unwrap();
    assert!(store.tasks()[0].notified);

    let fired = run_tick_at(&mut store, &notifier, now + Duration::minutes(30));
    assert_eq!(fired, 0);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn unavailable_channel_still_latches_the_task() {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("silent reminder", "", Some(now - Duration::seconds(1)));

    let notifier = RecordingNotifier::unavailable();
    let fired = run_tick_at(&mut store, &notifier, now);

    // An unseen reminder is never retried.
    assert_eq!(fired, 1);
    assert!(store.tasks()[0].notified);

    let fired_again = run_tick_at(&mut store, &notifier, now + Duration::minutes(1));
    assert_eq!(fired_again, 0);
}

#[test]
fn tick_fires_every_due_task_in_one_pass() {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("first due", "", Some(now - Duration::minutes(2)));
    store.add_task("not yet", "", Some(now + Duration::minutes(2)));
    store.add_task("second due", "", Some(now - Duration::minutes(1)));

    let (notifier, calls) = RecordingNotifier::new();
    let fired = run_tick_at(&mut store, &notifier, now);

    assert_eq!(fired, 2);
    let calls = calls.lock().unwrap();
    assert!(calls[0].1.contains("first due"));
    assert!(calls[1].1.contains("second due"));
    assert!(!store.tasks()[1].notified);
}

#[test]
fn spawned_scheduler_ticks_and_cancel_stops_it() {
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("already due", "", Some(Utc::now() - Duration::seconds(1)));
    let store = Arc::new(Mutex::new(store));

    let (notifier, calls) = RecordingNotifier::new();
    let handle =
        ReminderScheduler::new(std::time::Duration::from_millis(20)).spawn(Arc::clone(&store), notifier);

    // Generous wait for at least one tick on a loaded machine.
    std::thread::sleep(std::time::Duration::from_millis(300));
    handle.cancel();

    assert_eq!(calls.lock().unwrap().len(), 1);
    assert!(store.lock().unwrap().tasks()[0].notified);

    // After cancel no further ticks run even with a new due task.
    store
        .lock()
        .unwrap()
        .add_task("post-cancel", "", Some(Utc::now() - Duration::seconds(1)));
    std::thread::sleep(std::time::Duration::from_millis(100));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn wall_clock_tick_entry_point_matches_explicit_now() {
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("past due", "", Some(Utc::now() - Duration::hours(1)));

    let (notifier, calls) = RecordingNotifier::new();
    let fired = run_tick(&mut store, &notifier);

    assert_eq!(fired, 1);
    assert_eq!(calls.lock().unwrap().len(), 1);
}
