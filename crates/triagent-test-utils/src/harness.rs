// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness assembling a real store on temp storage plus a router.

use std::path::Path;

use triagent_router::TicketRouter;
use triagent_storage::TicketStore;

/// A ticket store rooted in a temp directory, paired with a router.
///
/// The temp directory is kept alive for the harness lifetime and
/// cleaned up on drop. `sabotage_backend` lets degradation tests break
/// the durable backend mid-run.
pub struct TestStore {
    pub store: TicketStore,
    pub router: TicketRouter,
    temp_dir: tempfile::TempDir,
}

impl TestStore {
    /// Build a harness with a freshly initialized durable store.
    pub async fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::TempDir::new()?;
        let store = TicketStore::initialize(temp_dir.path()).await;
        Ok(Self {
            store,
            router: TicketRouter::new(),
            temp_dir,
        })
    }

    /// Root directory the store was initialized under.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Drop the tickets table out from under the store so the next
    /// durable write fails and the fallback engages.
    pub fn sabotage_backend(&self) -> rusqlite::Result<()> {
        let conn = rusqlite::Connection::open(self.temp_dir.path().join(triagent_storage::DB_FILE))?;
        conn.execute_batch("DROP TABLE tickets;")
    }
}
