// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable ticket persistence for triagent.
//!
//! A SQLite database (via `tokio-rusqlite`'s single background writer)
//! holds tickets and their reply threads; schema changes ship as
//! embedded `refinery` migrations. When the database cannot be opened
//! or written, the store degrades to an in-process ordered map so that
//! ticket traffic survives a broken disk, at the cost of durability.

pub mod database;
pub mod memory;
mod migrations;
pub mod queries;
pub mod singleton;
pub mod store;

pub use database::Database;
pub use singleton::{reset_shared_store, shared_store};
pub use store::{TicketStore, DB_FILE};
