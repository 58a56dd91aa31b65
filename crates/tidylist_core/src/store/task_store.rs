//! Task store: ordered list plus the mutation contract.
//!
//! # Responsibility
//! - Provide add/edit/delete/toggle/reorder/mark-notified operations over
//!   the positional task list.
//! - Save the full list and publish a snapshot after every successful
//!   mutation.
//!
//! # Invariants
//! - Tasks are addressed by dense zero-based index; structural mutations
//!   re-index the sequence consistently.
//! - Save failures never roll back the in-memory mutation; memory and the
//!   durable slot may diverge until the next successful save.
//! - `notified` is never reset by any store operation, including due-date
//!   edits on an already-fired task.

use crate::model::task::Task;
use crate::storage::slot_storage::SlotStorage;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Change subscriber receiving the full list snapshot after each mutation.
///
/// This is the explicit "list changed" contract the presentation layer
/// re-renders from.
pub type ListSubscriber = Box<dyn Fn(&[Task]) + Send>;

/// Semantic error for operations referencing an out-of-range index.
///
/// Callers whose indices come from a live render of the same list treat
/// this as a logged no-op, never a crash.
#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfBounds { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "task index {index} out of bounds for list of {len}")
            }
        }
    }
}

impl Error for StoreError {}

/// Single owner of the ordered task list.
pub struct TaskStore<S: SlotStorage> {
    tasks: Vec<Task>,
    storage: S,
    subscribers: Vec<ListSubscriber>,
}

impl<S: SlotStorage> TaskStore<S> {
    /// Opens a store over the given slot storage, restoring the persisted
    /// list. An absent or corrupt slot restores an empty list; opening
    /// never fails on bad slot content.
    pub fn open(storage: S) -> Self {
        let tasks = storage.load();
        info!(
            "event=store_open module=store status=ok restored={}",
            tasks.len()
        );
        Self {
            tasks,
            storage,
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber invoked with the full snapshot after every
    /// successful mutation.
    pub fn subscribe(&mut self, subscriber: ListSubscriber) {
        self.subscribers.push(subscriber);
    }

    /// Current list in canonical order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Owned copy of the current list, for collaborators that outlive the
    /// borrow.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Appends a new task. Blank text (empty after trim) is rejected
    /// silently and returns `false`; nothing is saved or published.
    pub fn add_task(
        &mut self,
        text: impl Into<String>,
        category: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("event=add_task module=store status=rejected reason=blank_text");
            return false;
        }

        self.tasks.push(Task::new(text, category, due_date));
        self.commit("add_task");
        true
    }

    /// Removes the task at `index`; indices above it shift down by one.
    pub fn delete_task(&mut self, index: usize) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.tasks.remove(index);
        self.commit("delete_task");
        Ok(())
    }

    /// Flips the completion flag of the task at `index`.
    pub fn toggle_complete(&mut self, index: usize) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.tasks[index].toggle();
        self.commit("toggle_complete");
        Ok(())
    }

    /// Replaces the text of the task at `index`.
    ///
    /// Unlike add, edits carry no validation: any string including the
    /// empty string is accepted.
    pub fn edit_text(
        &mut self,
        index: usize,
        new_text: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.tasks[index].text = new_text.into();
        self.commit("edit_text");
        Ok(())
    }

    /// Replaces the category of the task at `index`.
    pub fn edit_category(
        &mut self,
        index: usize,
        new_category: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.tasks[index].category = new_category.into();
        self.commit("edit_category");
        Ok(())
    }

    /// Replaces the due time of the task at `index`.
    ///
    /// Does not touch `notified`: a task whose reminder already fired stays
    /// fired even when its due time moves into the future.
    pub fn edit_due_date(
        &mut self,
        index: usize,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.tasks[index].due_date = due_date;
        self.commit("edit_due_date");
        Ok(())
    }

    /// Moves the task at `from` out of the list and reinserts it at `to`
    /// in the shortened sequence: a single-element move, not a swap.
    ///
    /// Both indices are validated against the pre-move length. `from == to`
    /// is accepted and leaves the order unchanged.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.commit("reorder");
        Ok(())
    }

    /// Latches the reminder of the task at `index` as fired.
    ///
    /// Invoked by the reminder scheduler after dispatching the alert; the
    /// latch persists like any other mutation so a fired reminder survives
    /// restarts.
    pub fn mark_notified(&mut self, index: usize) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.tasks[index].mark_notified();
        self.commit("mark_notified");
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }

    /// Save-then-publish, run after every successful mutation.
    ///
    /// The save is fire-and-forget: a write failure is logged and the
    /// in-memory list stays authoritative until the next save succeeds.
    fn commit(&mut self, op: &'static str) {
        if let Err(err) = self.storage.save(&self.tasks) {
            warn!("event=slot_save module=store status=error op={op} error={err}");
        }
        for subscriber in &self.subscribers {
            subscriber(&self.tasks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, TaskStore};
    use crate::storage::slot_storage::MemorySlotStorage;

    fn empty_store() -> TaskStore<MemorySlotStorage> {
        TaskStore::open(MemorySlotStorage::new())
    }

    #[test]
    fn blank_add_is_a_silent_no_op() {
        let mut store = empty_store();
        assert!(!store.add_task("", "", None));
        assert!(!store.add_task("   ", "Work", None));
        assert!(store.is_empty());
        // Nothing was committed, so the slot stays untouched.
        assert!(store.storage.raw().is_none());
    }

    #[test]
    fn out_of_bounds_index_is_a_semantic_error() {
        let mut store = empty_store();
        store.add_task("only", "", None);

        let err = store.delete_task(3).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfBounds { index: 3, len: 1 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reorder_to_same_index_keeps_order() {
        let mut store = empty_store();
        store.add_task("a", "", None);
        store.add_task("b", "", None);

        store.reorder(1, 1).unwrap();
        let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "b"]);
    }
}
