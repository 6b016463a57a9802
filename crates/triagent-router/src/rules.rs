// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing rule table.
//!
//! Rules are data, not cascading conditionals: an ordered list of
//! (weight, predicate, target) entries evaluated top to bottom by a
//! single first-match-wins loop. Adding or reordering a rule is a table
//! edit. Weights are unique and the table is sorted by weight
//! descending, so ties are impossible by construction.

use triagent_core::TicketType;

use crate::router::{PrioritySignal, RouteContext, TeamTag};

/// A fn-pointer rule — zero-cost, no heap allocation.
pub struct RouteRule {
    /// Unique weight; the table is ordered by this, descending.
    pub weight: u16,
    /// Human-readable rule name for trace output.
    pub name: &'static str,
    pub matches: fn(&RouteContext) -> bool,
    pub target: TeamTag,
}

/// Keywords signalling planning or design intent.
pub const PLANNING_KEYWORDS: &[&str] = &["plan", "design", "architect", "roadmap", "strategy"];

/// Keywords signalling verification or testing intent.
pub const VERIFICATION_KEYWORDS: &[&str] = &["verify", "test", "validate", "review", "audit"];

/// Keywords signalling research or investigation intent.
pub const RESEARCH_KEYWORDS: &[&str] = &["research", "investigate", "explore", "analyze", "compare"];

/// Interrogatives marking a question for the answering team.
pub const QUESTION_KEYWORDS: &[&str] = &["what", "how", "why", "when", "where", "which", "?"];

/// Keywords signalling implementation work.
pub const IMPLEMENTATION_KEYWORDS: &[&str] = &["implement", "build", "write code", "develop", "refactor"];

fn contains_any(ctx: &RouteContext, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| ctx.haystack().contains(kw))
}

fn is_top_priority(ctx: &RouteContext) -> bool {
    matches!(ctx.priority(), PrioritySignal::Level(1))
}

/// The static rule table, weight descending. Direction is the strongest
/// signal (an AI asking a human always needs a human-facing answer);
/// keyword rules follow in descending specificity; priority-only
/// catch-alls sit below all keyword rules so specific intent outranks a
/// bare urgency flag.
pub const RULES: &[RouteRule] = &[
    RouteRule {
        weight: 100,
        name: "ai_to_human_needs_answer",
        matches: |ctx| ctx.ticket_type() == Some(TicketType::AiToHuman),
        target: TeamTag::Answer,
    },
    RouteRule {
        weight: 90,
        name: "urgent_planning_keyword",
        matches: |ctx| is_top_priority(ctx) && contains_any(ctx, PLANNING_KEYWORDS),
        target: TeamTag::Planning,
    },
    RouteRule {
        weight: 80,
        name: "verification_keyword",
        matches: |ctx| contains_any(ctx, VERIFICATION_KEYWORDS),
        target: TeamTag::Verification,
    },
    RouteRule {
        weight: 70,
        name: "research_keyword",
        matches: |ctx| contains_any(ctx, RESEARCH_KEYWORDS),
        target: TeamTag::Research,
    },
    RouteRule {
        weight: 60,
        name: "human_question",
        matches: |ctx| {
            ctx.ticket_type() == Some(TicketType::HumanToAi) && contains_any(ctx, QUESTION_KEYWORDS)
        },
        target: TeamTag::Answer,
    },
    RouteRule {
        weight: 50,
        name: "urgent_catch_all",
        matches: is_top_priority,
        target: TeamTag::Planning,
    },
    RouteRule {
        weight: 40,
        name: "implementation_keyword",
        matches: |ctx| contains_any(ctx, IMPLEMENTATION_KEYWORDS),
        target: TeamTag::Planning,
    },
];
