// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ticket store: durable SQLite backend with in-memory fallback.
//!
//! Exactly one backend is authoritative per store instance. The durable
//! backend is selected at `initialize`; an open, migration, or write
//! failure engages the in-memory fallback, and the switch is a one-way
//! valve — subsequent operations do not re-probe the durable backend
//! until a fresh `initialize` builds a new instance. The system stays
//! usable when persistence is degraded: tickets still flow, durability
//! loss is logged at warn.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};
use triagent_core::{
    AddReplyParams, CreateTicketParams, Reply, Ticket, TicketStatus, TriagentError,
    UpdateTicketParams,
};

use crate::database::Database;
use crate::memory::MemoryBacking;
use crate::queries::tickets as queries;

/// File name of the ticket database under the store's root directory.
pub const DB_FILE: &str = "tickets.db";

/// Durable, fallback-capable collection of tickets and their reply
/// threads.
///
/// All operations succeed from the caller's perspective; environmental
/// failures degrade to the fallback map rather than raising. Absent
/// tickets yield `None` from every read/update/reply operation.
pub struct TicketStore {
    db: Option<Database>,
    use_fallback: AtomicBool,
    fallback: MemoryBacking,
}

impl TicketStore {
    /// Open or create the ticket store rooted at `root`.
    ///
    /// Never fails: if the durable backend cannot be opened or migrated,
    /// the store starts in fallback mode instead of raising.
    pub async fn initialize(root: impl AsRef<Path>) -> Self {
        let db_path = root.as_ref().join(DB_FILE);
        match Database::open(&db_path).await {
            Ok(db) => {
                debug!(path = %db_path.display(), "ticket store using durable backend");
                Self {
                    db: Some(db),
                    use_fallback: AtomicBool::new(false),
                    fallback: MemoryBacking::new(),
                }
            }
            Err(err) => {
                warn!(
                    error = %err,
                    path = %db_path.display(),
                    "ticket database unavailable; serving from in-memory fallback"
                );
                Self {
                    db: None,
                    use_fallback: AtomicBool::new(true),
                    fallback: MemoryBacking::new(),
                }
            }
        }
    }

    /// Whether this instance is serving from the in-memory fallback.
    pub fn is_fallback(&self) -> bool {
        self.use_fallback.load(Ordering::Acquire)
    }

    /// The durable backend, if it is still authoritative.
    fn durable(&self) -> Option<&Database> {
        if self.use_fallback.load(Ordering::Acquire) {
            None
        } else {
            self.db.as_ref()
        }
    }

    /// Flip the one-way fallback valve after a durable write failure.
    fn engage_fallback(&self, operation: &str, err: &TriagentError) {
        if !self.use_fallback.swap(true, Ordering::AcqRel) {
            warn!(
                error = %err,
                operation,
                "durable write failed; fallback engaged until the store is re-initialized"
            );
        }
    }

    /// Write a ticket to the active backend.
    ///
    /// On a durable write failure the same record lands in the fallback
    /// map and the operation still succeeds; the record is never lost.
    async fn write_through(&self, ticket: Ticket, operation: &str, insert: bool) -> Ticket {
        if let Some(db) = self.durable() {
            let result = if insert {
                queries::insert_ticket(db, &ticket).await
            } else {
                queries::persist_ticket(db, &ticket).await
            };
            match result {
                Ok(()) => return ticket,
                Err(err) => self.engage_fallback(operation, &err),
            }
        }
        self.fallback.insert(ticket.clone()).await;
        ticket
    }

    /// Create a ticket and persist it.
    ///
    /// Generates a fresh id, starts the lifecycle at `open` with an
    /// empty thread, and stamps `created_at == updated_at`. Returns the
    /// fully materialized ticket; never fails.
    pub async fn create_ticket(&self, params: CreateTicketParams) -> Ticket {
        let ticket = Ticket::create(params);
        self.write_through(ticket, "create_ticket", true).await
    }

    /// Get a ticket by id; `None` for an unknown id.
    ///
    /// A durable read failure degrades to the fallback map without
    /// raising (and without engaging the fallback valve).
    pub async fn get_ticket(&self, id: &str) -> Option<Ticket> {
        if let Some(db) = self.durable() {
            match queries::get_ticket(db, id).await {
                Ok(found) => return found,
                Err(err) => {
                    warn!(error = %err, ticket_id = id, "durable read failed; serving from fallback map");
                }
            }
        }
        self.fallback.get(id).await
    }

    /// List tickets ordered by ascending priority, then descending
    /// creation time. An optional status filter narrows the result set;
    /// the result is empty (not an error) when nothing matches.
    pub async fn get_all_tickets(&self, status: Option<TicketStatus>) -> Vec<Ticket> {
        if let Some(db) = self.durable() {
            match queries::list_tickets(db, status).await {
                Ok(tickets) => return tickets,
                Err(err) => {
                    warn!(error = %err, "durable list failed; serving from fallback map");
                }
            }
        }
        self.fallback.list(status).await
    }

    /// Append a reply to a ticket's thread.
    ///
    /// Returns `None` if the ticket does not exist. Otherwise the reply
    /// gets a fresh id and timestamp, `updated_at` advances, and the
    /// updated ticket is persisted with the same write-failure fallback
    /// as create.
    pub async fn add_reply(&self, params: AddReplyParams) -> Option<Ticket> {
        let mut ticket = self.get_ticket(&params.ticket_id).await?;
        ticket.append_reply(Reply::create(
            params.author,
            params.content,
            params.clarity_score,
        ));
        Some(self.write_through(ticket, "add_reply", false).await)
    }

    /// Apply a partial update (status/assignee/resolution) to a ticket.
    ///
    /// Returns `None` if the ticket does not exist. Only the fields
    /// present in `params` are applied; `updated_at` advances.
    pub async fn update_ticket(&self, params: UpdateTicketParams) -> Option<Ticket> {
        let mut ticket = self.get_ticket(&params.ticket_id).await?;
        ticket.apply_update(&params);
        Some(self.write_through(ticket, "update_ticket", false).await)
    }

    /// Release the durable backend's resources if held.
    ///
    /// A no-op in pure fallback mode; idempotent, safe to call twice.
    /// Checkpoint failures are absorbed.
    pub async fn close(&self) {
        if let Some(db) = self.db.as_ref() {
            if let Err(err) = db.checkpoint().await {
                debug!(error = %err, "checkpoint on close failed");
            }
        }
    }
}
