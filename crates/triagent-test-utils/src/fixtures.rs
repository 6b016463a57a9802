// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builders for ticket tests.

use triagent_core::{AddReplyParams, CreateTicketParams, TicketType};

/// A create-ticket fixture with sane defaults; override fields with
/// struct update syntax at the call site.
pub fn ticket_params(title: &str) -> CreateTicketParams {
    CreateTicketParams {
        ticket_type: TicketType::HumanToAi,
        priority: 2,
        creator: "human:tester".to_string(),
        assignee: None,
        task_id: None,
        title: title.to_string(),
        description: String::new(),
    }
}

/// An add-reply fixture targeting `ticket_id`.
pub fn reply_params(ticket_id: &str, content: &str) -> AddReplyParams {
    AddReplyParams {
        ticket_id: ticket_id.to_string(),
        author: "agent:responder".to_string(),
        content: content.to_string(),
        clarity_score: None,
    }
}
