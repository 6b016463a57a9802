// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate validation and the first-match-wins routing loop.

use serde::{Deserialize, Serialize};
use tracing::debug;
use triagent_core::{Ticket, TicketType};

use crate::rules::RULES;

/// Destination team for a routed ticket.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TeamTag {
    Answer,
    Planning,
    Verification,
    Research,
    Escalate,
}

/// Priority as observed on an incoming candidate.
///
/// `Absent` means the field was never provided (a structural defect,
/// escalated). `Unknown` means the field was provided but carries no
/// usable level; such a ticket is structurally valid and routes by
/// keywords alone, since no priority rule can match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrioritySignal {
    Absent,
    Unknown,
    Level(u8),
}

/// A ticket as presented for routing, before structural validation.
///
/// Fields that the data model guarantees are optional here because the
/// router sits at a trust boundary: callers hand it whatever arrived on
/// the wire, and a malformed-but-present ticket must escalate rather
/// than crash.
#[derive(Debug, Clone)]
pub struct TicketCandidate {
    pub ticket_id: Option<String>,
    pub ticket_type: Option<TicketType>,
    pub priority: PrioritySignal,
    pub title: String,
    pub description: String,
}

impl From<&Ticket> for TicketCandidate {
    fn from(ticket: &Ticket) -> Self {
        Self {
            ticket_id: Some(ticket.ticket_id.clone()),
            ticket_type: Some(ticket.ticket_type),
            priority: PrioritySignal::Level(ticket.priority),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
        }
    }
}

/// Evaluation context handed to rule predicates.
///
/// Pre-lowercases `title + " " + description` once so every keyword
/// rule does cheap substring checks against the same haystack.
pub struct RouteContext<'a> {
    candidate: &'a TicketCandidate,
    haystack: String,
}

impl<'a> RouteContext<'a> {
    pub fn new(candidate: &'a TicketCandidate) -> Self {
        let haystack = format!("{} {}", candidate.title, candidate.description).to_lowercase();
        Self { candidate, haystack }
    }

    pub fn ticket_type(&self) -> Option<TicketType> {
        self.candidate.ticket_type
    }

    pub fn priority(&self) -> PrioritySignal {
        self.candidate.priority
    }

    /// Lowercased `title + " " + description`.
    pub fn haystack(&self) -> &str {
        &self.haystack
    }
}

/// Pure, deterministic ticket router over the static rule table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TicketRouter;

impl TicketRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route a ticket to exactly one destination team.
    ///
    /// # Panics
    ///
    /// Panics if `candidate` is `None`: a caller presenting no ticket
    /// at all is a bug upstream, not a routing ambiguity. A present but
    /// structurally incomplete candidate (missing id, missing type, or
    /// never-provided priority) routes to `Escalate` instead, because
    /// a malformed ticket is a legitimate runtime occurrence a human
    /// triage team should see.
    pub fn route(&self, candidate: Option<&TicketCandidate>) -> TeamTag {
        let candidate = candidate.expect("route() called without a ticket");

        if candidate.ticket_id.is_none()
            || candidate.ticket_type.is_none()
            || candidate.priority == PrioritySignal::Absent
        {
            debug!(?candidate, "structurally incomplete ticket escalated");
            return TeamTag::Escalate;
        }

        let ctx = RouteContext::new(candidate);
        for rule in RULES {
            if (rule.matches)(&ctx) {
                debug!(rule = rule.name, weight = rule.weight, target = %rule.target, "rule matched");
                return rule.target;
            }
        }

        // No silent default: an unmatched ticket is an explicit,
        // observable outcome for human triage.
        debug!("no rule matched; escalating");
        TeamTag::Escalate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        ticket_type: TicketType,
        priority: PrioritySignal,
        title: &str,
        description: &str,
    ) -> TicketCandidate {
        TicketCandidate {
            ticket_id: Some("tkt-0000000000000001-abcdef".to_string()),
            ticket_type: Some(ticket_type),
            priority,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    #[should_panic(expected = "route() called without a ticket")]
    fn routing_no_ticket_panics() {
        TicketRouter::new().route(None);
    }

    #[test]
    fn structurally_empty_candidate_escalates() {
        let empty = TicketCandidate {
            ticket_id: None,
            ticket_type: None,
            priority: PrioritySignal::Absent,
            title: String::new(),
            description: String::new(),
        };
        assert_eq!(TicketRouter::new().route(Some(&empty)), TeamTag::Escalate);
    }

    #[test]
    fn missing_id_alone_escalates() {
        let mut c = candidate(TicketType::AiToHuman, PrioritySignal::Level(1), "Plan", "");
        c.ticket_id = None;
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Escalate);
    }

    #[test]
    fn missing_type_alone_escalates() {
        let mut c = candidate(TicketType::HumanToAi, PrioritySignal::Level(1), "Plan", "");
        c.ticket_type = None;
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Escalate);
    }

    #[test]
    fn absent_priority_escalates_but_unknown_does_not() {
        let mut c = candidate(TicketType::HumanToAi, PrioritySignal::Absent, "Verify it", "");
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Escalate);

        c.priority = PrioritySignal::Unknown;
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Verification);
    }

    #[test]
    fn direction_beats_urgent_planning() {
        // Weight 100 beats weight 90 even when both would match.
        let c = candidate(
            TicketType::AiToHuman,
            PrioritySignal::Level(1),
            "Plan the architecture",
            "",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Answer);
    }

    #[test]
    fn verification_beats_research() {
        // Weight 80 beats weight 70 when both keyword families appear.
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(3),
            "Verify after research",
            "Test the results and investigate findings",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Verification);
    }

    #[test]
    fn urgent_planning_keyword_routes_to_planning() {
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(1),
            "Design the storage layout",
            "",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Planning);
    }

    #[test]
    fn research_keyword_routes_to_research() {
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(3),
            "Compare the two crates",
            "Explore the tradeoffs",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Research);
    }

    #[test]
    fn human_question_routes_to_answer() {
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(2),
            "How does the fallback engage",
            "",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Answer);
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(3),
            "VERIFY THE OUTPUT",
            "",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Verification);
    }

    #[test]
    fn bare_urgency_routes_to_planning() {
        let c = candidate(TicketType::HumanToAi, PrioritySignal::Level(1), "Urgent item", "");
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Planning);
    }

    #[test]
    fn unknown_priority_never_matches_priority_rules() {
        // Unknown priority with no keywords falls through every rule.
        let c = candidate(TicketType::HumanToAi, PrioritySignal::Unknown, "Urgent item", "");
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Escalate);
    }

    #[test]
    fn implementation_keyword_routes_to_planning() {
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(3),
            "Implement the parser",
            "",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Planning);
    }

    #[test]
    fn no_match_escalates() {
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(3),
            "Random task",
            "Some random work",
        );
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Escalate);
    }

    #[test]
    fn routing_is_deterministic() {
        let router = TicketRouter::new();
        let c = candidate(
            TicketType::HumanToAi,
            PrioritySignal::Level(1),
            "Plan and verify",
            "Design then test",
        );
        let first = router.route(Some(&c));
        for _ in 0..100 {
            assert_eq!(router.route(Some(&c)), first);
        }
    }

    #[test]
    fn every_candidate_gets_exactly_one_team() {
        // Totality sweep across types, priorities, and keyword families.
        let router = TicketRouter::new();
        let titles = [
            "",
            "Plan it",
            "Verify it",
            "Investigate it",
            "What is this",
            "Implement it",
            "Nothing notable",
        ];
        for ticket_type in [TicketType::AiToHuman, TicketType::HumanToAi] {
            for priority in [
                PrioritySignal::Unknown,
                PrioritySignal::Level(1),
                PrioritySignal::Level(3),
            ] {
                for title in titles {
                    let c = candidate(ticket_type, priority, title, "");
                    // Any result is fine; the point is no panic and a
                    // single stable answer.
                    let team = router.route(Some(&c));
                    assert_eq!(router.route(Some(&c)), team);
                }
            }
        }
    }

    #[test]
    fn team_tag_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&TeamTag::Verification).unwrap(), "\"verification\"");
        assert_eq!(TeamTag::Escalate.to_string(), "escalate");
    }

    #[test]
    fn candidate_from_ticket_is_structurally_complete() {
        let ticket = Ticket::create(triagent_core::CreateTicketParams {
            ticket_type: TicketType::AiToHuman,
            priority: 2,
            creator: "agent:coder".to_string(),
            assignee: None,
            task_id: None,
            title: "Need input".to_string(),
            description: String::new(),
        });
        let c = TicketCandidate::from(&ticket);
        assert_eq!(TicketRouter::new().route(Some(&c)), TeamTag::Answer);
    }
}
