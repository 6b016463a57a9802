// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process fallback backing for the ticket store.
//!
//! When the durable backend cannot be opened or a write fails, the store
//! serves all operations from this ordered map instead. The map is lock
//! protected because concurrent in-process callers are tolerated.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use triagent_core::{Ticket, TicketStatus};

/// Ordered in-memory ticket map keyed by `ticket_id`.
#[derive(Default)]
pub(crate) struct MemoryBacking {
    tickets: RwLock<BTreeMap<String, Ticket>>,
}

impl MemoryBacking {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a ticket record.
    pub(crate) async fn insert(&self, ticket: Ticket) {
        self.tickets
            .write()
            .await
            .insert(ticket.ticket_id.clone(), ticket);
    }

    /// Get a ticket by id.
    pub(crate) async fn get(&self, id: &str) -> Option<Ticket> {
        self.tickets.read().await.get(id).cloned()
    }

    /// List tickets with the same ordering as the durable backend:
    /// priority ascending, then creation time descending.
    pub(crate) async fn list(&self, status: Option<TicketStatus>) -> Vec<Ticket> {
        let guard = self.tickets.read().await;
        let mut tickets: Vec<Ticket> = guard
            .values()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        tickets
    }
}
