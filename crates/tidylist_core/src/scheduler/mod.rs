//! Due-reminder scanning and dispatch.
//!
//! # Responsibility
//! - Scan the store on a fixed cadence for tasks whose due time passed.
//! - Dispatch one alert per task and latch it as fired.
//!
//! # Invariants
//! - A reminder may fire up to one interval late but never before its due
//!   time.
//! - Fired is terminal: a task alerts at most once, even when the alert
//!   channel was unavailable.

pub mod notifier;
pub mod reminder;
