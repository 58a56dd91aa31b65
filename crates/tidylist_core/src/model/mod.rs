//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, storage and scheduler.
//!
//! # Invariants
//! - Every task carries a stable internal `TaskId`; external addressing
//!   stays positional.
//! - `notified` transitions false -> true exactly once and is never reset.

pub mod task;
