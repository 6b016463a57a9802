// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic ticket routing.
//!
//! Given one ticket, return exactly one destination team. The router is
//! a pure function over an ordered rule table: no store access, no
//! network, no mutable state, so it is safe to call from any number of
//! concurrent callers without synchronization.

pub mod router;
pub mod rules;

pub use router::{PrioritySignal, RouteContext, TeamTag, TicketCandidate, TicketRouter};
pub use rules::{RouteRule, RULES};
