//! Storage layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable slot contract used by the task store.
//! - Isolate SQLite and serialization details from store orchestration.
//!
//! # Invariants
//! - Loads never fail the caller: an absent or malformed slot degrades to
//!   an empty list.
//! - Saves rewrite the whole slot; there is no incremental persistence.

pub mod slot_storage;
