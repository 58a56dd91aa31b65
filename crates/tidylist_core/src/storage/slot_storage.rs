//! Durable slot contract and implementations.
//!
//! # Responsibility
//! - Serialize the full task list into a single key-value slot and back.
//! - Keep SQL and JSON details inside the storage boundary.
//!
//! # Invariants
//! - `load` favors availability over validation: absent or malformed slot
//!   content returns an empty list and logs, never an error.
//! - `save` overwrites the whole slot; the serialized sequence order is the
//!   canonical task order.

use crate::db::DbError;
use crate::model::task::Task;
use log::warn;
use rusqlite::Connection;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key of the single slot holding the serialized task list.
const TASKS_SLOT_KEY: &str = "tasks";

pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by slot writes. Reads never surface errors.
#[derive(Debug)]
pub enum StorageError {
    Serde(serde_json::Error),
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serde(err) => write!(f, "slot serialization failed: {err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serde(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable slot interface consumed by the task store.
pub trait SlotStorage {
    /// Reads the persisted task list. Absent or malformed slot content
    /// degrades to an empty list; this method never fails.
    fn load(&self) -> Vec<Task>;

    /// Serializes the full list and overwrites the slot.
    fn save(&self, tasks: &[Task]) -> StorageResult<()>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for &S {
    fn load(&self) -> Vec<Task> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        (**self).save(tasks)
    }
}

/// SQLite-backed slot storage over a migrated connection.
///
/// Owns the connection so a store using it can move across threads.
pub struct SqliteSlotStorage {
    conn: Connection,
}

impl SqliteSlotStorage {
    /// Wraps a connection opened via [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn load(&self) -> Vec<Task> {
        let raw: Option<String> = match self.conn.query_row(
            "SELECT value FROM slots WHERE key = ?1;",
            [TASKS_SLOT_KEY],
            |row| row.get(0),
        ) {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(err) => {
                warn!("event=slot_load module=storage status=error error={err}");
                None
            }
        };

        match raw {
            Some(raw) => decode_slot(&raw),
            None => Vec::new(),
        }
    }

    fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let payload = serde_json::to_string(tasks)?;
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            [TASKS_SLOT_KEY, payload.as_str()],
        )?;
        Ok(())
    }
}

/// In-memory slot storage for tests and session-only use.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slot: RefCell<Option<String>>,
}

impl MemorySlotStorage {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with raw payload bytes, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    /// Returns the current raw slot payload, if any was saved.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn load(&self) -> Vec<Task> {
        match self.slot.borrow().as_deref() {
            Some(raw) => decode_slot(raw),
            None => Vec::new(),
        }
    }

    fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let payload = serde_json::to_string(tasks)?;
        *self.slot.borrow_mut() = Some(payload);
        Ok(())
    }
}

fn decode_slot(raw: &str) -> Vec<Task> {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        // Corrupt slot content must never block the user; start over empty.
        warn!("event=slot_load module=storage status=malformed error={err}");
        Vec::new()
    })
}
