// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triagent ticket routing engine.
//!
//! This crate provides the ticket and reply domain types, the shared
//! error type, and identifier/timestamp generation used throughout the
//! Triagent workspace.

pub mod error;
pub mod ids;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TriagentError;
pub use ids::{new_reply_id, new_ticket_id, now_iso};
pub use types::{
    AddReplyParams, CreateTicketParams, Reply, Ticket, TicketStatus, TicketType,
    UpdateTicketParams,
};
