//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its durable wire shape.
//! - Provide lifecycle helpers for completion and reminder state.
//!
//! # Invariants
//! - `id` is stable for the in-memory lifetime of a task; it is not part of
//!   the wire shape and is regenerated on load.
//! - `notified` moves false -> true exactly once; no helper resets it.
//! - The wire shape matches the durable slot layout: `text`, `completed`,
//!   `category`, `dueDate` (ISO-8601 or null), `notified`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable internal identifier for a task.
///
/// Ordering and the public mutation contract remain positional; the id
/// exists so future concurrent callers have something better than an index
/// to hold on to.
pub type TaskId = Uuid;

/// A single to-do entry.
///
/// Field names are serialized camelCase-compatible with the durable slot
/// layout; `id` is internal only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Internal stable id, skipped on the wire and regenerated on load.
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: TaskId,
    /// Display text. Non-empty at creation; edits may set any string.
    pub text: String,
    /// Completion flag toggled by the user.
    pub completed: bool,
    /// Free-form category; empty means uncategorized.
    pub category: String,
    /// Optional due time. Absent means no reminder will ever fire.
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Reminder latch: true once the due alert has fired, never re-armed.
    pub notified: bool,
}

impl Task {
    /// Creates a new task with a generated stable id.
    ///
    /// # Invariants
    /// - `completed` and `notified` start as `false`.
    /// - Text validation (non-blank) is the store's responsibility, not the
    ///   model's.
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            category: category.into(),
            due_date,
            notified: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Latches the reminder as fired.
    pub fn mark_notified(&mut self) {
        self.notified = true;
    }

    /// Returns whether the reminder for this task should fire at `now`.
    ///
    /// True only when a due time is set, it has passed, and no alert has
    /// fired yet. Tasks without a due time never become due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.notified && self.due_date.is_some_and(|due| due <= now)
    }
}
