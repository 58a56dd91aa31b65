//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tidylist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tidylist_core::{MemorySlotStorage, TaskStore};

fn main() {
    // Why: a tiny probe over an in-memory slot validates core wiring
    // without touching any on-disk database.
    let mut store = TaskStore::open(MemorySlotStorage::new());
    store.add_task("Try TidyList", "", None);

    println!("tidylist_core version={}", tidylist_core::core_version());
    println!("tidylist_core tasks={}", store.len());
}
