// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket and reply domain types.
//!
//! A [`Ticket`] is the unit of work routed between humans and agent
//! teams. It owns an append-only [`Reply`] thread and a lifecycle
//! status. Tickets are never physically deleted; closure is a status
//! transition.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::ids::{new_reply_id, new_ticket_id, now_iso};

/// Direction of a ticket: which side is asking the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    /// An AI agent asking a human for input.
    AiToHuman,
    /// A human asking an agent team for work.
    HumanToAi,
}

/// Lifecycle state of a ticket. Starts at `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InReview,
    Resolved,
    Rejected,
}

/// One entry in a ticket's reply thread.
///
/// Replies are append-only: never removed, never mutated, insertion
/// order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Unique reply identifier, assigned at append time.
    pub reply_id: String,
    /// Opaque identity of the author.
    pub author: String,
    /// Free-text reply body.
    pub content: String,
    /// Optional clarity annotation supplied by the caller.
    /// The storage core never computes this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarity_score: Option<f64>,
    /// ISO 8601 timestamp of the append.
    pub created_at: String,
}

impl Reply {
    /// Materialize a new reply with a fresh id and timestamp.
    pub fn create(author: String, content: String, clarity_score: Option<f64>) -> Self {
        Self {
            reply_id: new_reply_id(),
            author,
            content,
            clarity_score,
            created_at: now_iso(),
        }
    }
}

/// A unit of work routed between a human and an agent team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Globally unique identifier, assigned at creation, immutable.
    pub ticket_id: String,
    /// Direction of the request.
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    /// Lifecycle state.
    pub status: TicketStatus,
    /// 1 (highest) through 3 (lowest). Used for routing and store ordering.
    pub priority: u8,
    /// Opaque identity of the creator.
    pub creator: String,
    /// Opaque identity of the assignee, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Optional back-reference to an external work item.
    /// No referential integrity is enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Free-text title, searched by the router's keyword rules.
    pub title: String,
    /// Free-text description, searched by the router's keyword rules.
    pub description: String,
    /// Append-only reply thread, insertion order preserved.
    #[serde(default)]
    pub thread: Vec<Reply>,
    /// Free text set when the ticket is closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 timestamp of the last mutation. Advanced on every
    /// create, update, and reply append, and never any other time.
    pub updated_at: String,
}

impl Ticket {
    /// Materialize a new ticket from creation parameters.
    ///
    /// Assigns a fresh id, sets status to `Open` with an empty thread,
    /// and stamps `created_at == updated_at`.
    pub fn create(params: CreateTicketParams) -> Self {
        let now = now_iso();
        Self {
            ticket_id: new_ticket_id(),
            ticket_type: params.ticket_type,
            status: TicketStatus::Open,
            priority: params.priority,
            creator: params.creator,
            assignee: params.assignee,
            task_id: params.task_id,
            title: params.title,
            description: params.description,
            thread: Vec::new(),
            resolution: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Append a reply to the thread and advance `updated_at`.
    pub fn append_reply(&mut self, reply: Reply) {
        self.thread.push(reply);
        self.updated_at = now_iso();
    }

    /// Apply a partial update (only the fields present in `params`)
    /// and advance `updated_at`.
    pub fn apply_update(&mut self, params: &UpdateTicketParams) {
        if let Some(status) = params.status {
            self.status = status;
        }
        if let Some(assignee) = &params.assignee {
            self.assignee = Some(assignee.clone());
        }
        if let Some(resolution) = &params.resolution {
            self.resolution = Some(resolution.clone());
        }
        self.updated_at = now_iso();
    }
}

/// Parameters for creating a ticket. Callers are trusted; no validation
/// beyond structural shape is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketParams {
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub priority: u8,
    pub creator: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Parameters for a partial ticket update. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTicketParams {
    pub ticket_id: String,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

/// Parameters for appending a reply to a ticket's thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddReplyParams {
    pub ticket_id: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub clarity_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn params() -> CreateTicketParams {
        CreateTicketParams {
            ticket_type: TicketType::HumanToAi,
            priority: 2,
            creator: "human:alice".to_string(),
            assignee: None,
            task_id: None,
            title: "Fix the login flow".to_string(),
            description: "Sessions expire too early".to_string(),
        }
    }

    #[test]
    fn ticket_type_round_trips_snake_case() {
        for variant in [TicketType::AiToHuman, TicketType::HumanToAi] {
            let s = variant.to_string();
            assert_eq!(variant, TicketType::from_str(&s).unwrap());
        }
        assert_eq!(TicketType::AiToHuman.to_string(), "ai_to_human");
    }

    #[test]
    fn ticket_status_round_trips_snake_case() {
        for variant in [
            TicketStatus::Open,
            TicketStatus::InReview,
            TicketStatus::Resolved,
            TicketStatus::Rejected,
        ] {
            let s = variant.to_string();
            assert_eq!(variant, TicketStatus::from_str(&s).unwrap());
        }
        assert_eq!(TicketStatus::InReview.to_string(), "in_review");
    }

    #[test]
    fn create_starts_open_with_empty_thread() {
        let ticket = Ticket::create(params());
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.thread.is_empty());
        assert!(ticket.resolution.is_none());
        assert_eq!(ticket.created_at, ticket.updated_at);
    }

    #[test]
    fn append_reply_advances_updated_at() {
        let mut ticket = Ticket::create(params());
        let created = ticket.created_at.clone();
        ticket.append_reply(Reply::create("agent:bot".into(), "On it".into(), None));
        assert_eq!(ticket.thread.len(), 1);
        assert!(ticket.updated_at >= created);
    }

    #[test]
    fn apply_update_touches_only_present_fields() {
        let mut ticket = Ticket::create(params());
        ticket.apply_update(&UpdateTicketParams {
            ticket_id: ticket.ticket_id.clone(),
            status: Some(TicketStatus::Resolved),
            assignee: None,
            resolution: Some("Rolled out fix".into()),
        });
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert!(ticket.assignee.is_none());
        assert_eq!(ticket.resolution.as_deref(), Some("Rolled out fix"));
    }

    #[test]
    fn ticket_serializes_type_field_on_the_wire() {
        let ticket = Ticket::create(params());
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["type"], "human_to_ai");
        assert_eq!(json["status"], "open");
        let back: Ticket = serde_json::from_value(json).unwrap();
        assert_eq!(back, ticket);
    }
}
