// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide shared ticket store.
//!
//! Concurrent agents in one process share a single store handle so the
//! fallback valve and the SQLite writer are not duplicated. The handle
//! is built lazily on first use and lives until `reset_shared_store`.

use std::path::Path;
use std::sync::Mutex;
use std::sync::Arc;

use crate::store::TicketStore;

static SHARED: Mutex<Option<Arc<TicketStore>>> = Mutex::new(None);

/// Get the shared store, initializing it under `root` on first call.
///
/// Subsequent calls return the same handle and ignore `root`; callers
/// that need a different root must `reset_shared_store` first.
pub async fn shared_store(root: impl AsRef<Path>) -> Arc<TicketStore> {
    if let Some(existing) = SHARED.lock().expect("shared store lock poisoned").clone() {
        return existing;
    }
    // Built outside the lock; a racing first caller may build a second
    // store, in which case the winner's handle is kept and the loser's
    // spare is dropped unused.
    let fresh = Arc::new(TicketStore::initialize(root).await);
    let mut slot = SHARED.lock().expect("shared store lock poisoned");
    match &*slot {
        Some(existing) => existing.clone(),
        None => {
            *slot = Some(fresh.clone());
            fresh
        }
    }
}

/// Drop the shared handle so the next `shared_store` builds anew.
///
/// Intended for tests and for re-rooting the store after a
/// configuration change.
pub fn reset_shared_store() {
    SHARED.lock().expect("shared store lock poisoned").take();
}
