// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket CRUD operations.
//!
//! The reply thread is stored as a JSON column on the ticket row;
//! [`row_to_ticket`] is the deserialization boundary and tolerates
//! corrupted or legacy thread values by substituting an empty thread.

use std::str::FromStr;

use rusqlite::params;
use triagent_core::{Ticket, TicketStatus, TicketType, TriagentError};

use crate::database::{map_tr_err, Database};

const TICKET_COLUMNS: &str = "ticket_id, ticket_type, status, priority, creator, assignee, \
     task_id, title, description, thread, resolution, created_at, updated_at";

/// Map one ticket row to a [`Ticket`].
///
/// A `thread` column holding unparseable JSON yields an empty thread
/// rather than a failed read; NULL optional columns map to `None`.
pub fn row_to_ticket(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ticket> {
    let type_text: String = row.get(1)?;
    let ticket_type = TicketType::from_str(&type_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let status_text: String = row.get(2)?;
    let status = TicketStatus::from_str(&status_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let thread_json: String = row.get(9)?;
    let thread = serde_json::from_str(&thread_json).unwrap_or_default();

    Ok(Ticket {
        ticket_id: row.get(0)?,
        ticket_type,
        status,
        priority: row.get(3)?,
        creator: row.get(4)?,
        assignee: row.get(5)?,
        task_id: row.get(6)?,
        title: row.get(7)?,
        description: row.get(8)?,
        thread,
        resolution: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn thread_to_json(ticket: &Ticket) -> Result<String, TriagentError> {
    serde_json::to_string(&ticket.thread).map_err(|e| TriagentError::Storage {
        source: Box::new(e),
    })
}

/// Insert a newly created ticket.
pub async fn insert_ticket(db: &Database, ticket: &Ticket) -> Result<(), TriagentError> {
    let thread_json = thread_to_json(ticket)?;
    let ticket = ticket.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tickets (ticket_id, ticket_type, status, priority, creator, \
                 assignee, task_id, title, description, thread, resolution, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    ticket.ticket_id,
                    ticket.ticket_type.to_string(),
                    ticket.status.to_string(),
                    ticket.priority,
                    ticket.creator,
                    ticket.assignee,
                    ticket.task_id,
                    ticket.title,
                    ticket.description,
                    thread_json,
                    ticket.resolution,
                    ticket.created_at,
                    ticket.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a ticket by id. Returns `None` for an unknown id.
pub async fn get_ticket(db: &Database, id: &str) -> Result<Option<Ticket>, TriagentError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = ?1"
            ))?;
            let result = stmt.query_row(params![id], row_to_ticket);
            match result {
                Ok(ticket) => Ok(Some(ticket)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List tickets, optionally filtered by status.
///
/// Ordered by ascending priority, then descending creation time, so the
/// most urgent, most recent work surfaces first.
pub async fn list_tickets(
    db: &Database,
    status: Option<TicketStatus>,
) -> Result<Vec<Ticket>, TriagentError> {
    db.connection()
        .call(move |conn| {
            let mut tickets = Vec::new();
            match status {
                Some(filter) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {TICKET_COLUMNS} FROM tickets WHERE status = ?1
                         ORDER BY priority ASC, created_at DESC"
                    ))?;
                    let rows = stmt.query_map(params![filter.to_string()], row_to_ticket)?;
                    for row in rows {
                        tickets.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {TICKET_COLUMNS} FROM tickets
                         ORDER BY priority ASC, created_at DESC"
                    ))?;
                    let rows = stmt.query_map([], row_to_ticket)?;
                    for row in rows {
                        tickets.push(row?);
                    }
                }
            }
            Ok(tickets)
        })
        .await
        .map_err(map_tr_err)
}

/// Persist the mutable columns of an already-inserted ticket
/// (status, assignee, resolution, thread, updated_at).
///
/// Used by the reply-append and partial-update paths.
pub async fn persist_ticket(db: &Database, ticket: &Ticket) -> Result<(), TriagentError> {
    let thread_json = thread_to_json(ticket)?;
    let ticket = ticket.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE tickets SET status = ?1, assignee = ?2, resolution = ?3,
                 thread = ?4, updated_at = ?5 WHERE ticket_id = ?6",
                params![
                    ticket.status.to_string(),
                    ticket.assignee,
                    ticket.resolution,
                    thread_json,
                    ticket.updated_at,
                    ticket.ticket_id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
