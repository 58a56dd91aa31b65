//! Task list state engine.
//!
//! # Responsibility
//! - Own the ordered task collection and every mutation over it.
//! - Keep persistence and change subscribers in step with each mutation.
//!
//! # Invariants
//! - Indices are dense, zero-based and contiguous after every mutation.
//! - The store is the single owner of the list; collaborators observe
//!   snapshots, never mutate directly.

pub mod task_store;
