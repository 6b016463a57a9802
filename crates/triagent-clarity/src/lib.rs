// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vagueness detection and clarity scoring for ticket text.
//!
//! Before a ticket or reply is committed, its free text can be scanned
//! for hedging language, unspecified quantities, and placeholder
//! markers. Detection is line-oriented: each line is flagged at most
//! once, and flagged lines feed both the clarifying-question templates
//! and the aggregate clarity score attached to replies.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Case-insensitive patterns marking a line as vague.
const VAGUE_INDICATORS: &[&str] = &[
    r"(?i)\b(maybe|perhaps|possibly|might|could|should)\b",
    r"(?i)\b(some|few|many|several|various)\b",
    r"(?i)\b(etc|and so on)\b",
    r"(?i)\b(TBD|TODO|FIXME)\b",
    r"(?i)\b(approximately|around|about)\b",
    r"\?\?",
];

fn indicators() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        VAGUE_INDICATORS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("static vagueness pattern is valid"))
            .collect()
    })
}

/// A line flagged as vague, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VagueLine {
    pub line: usize,
    pub text: String,
}

/// Scan `text` line by line and return every line containing a
/// vagueness indicator. A line matching several indicators is reported
/// once. Empty input yields an empty result.
pub fn find_vague_lines(text: &str) -> Vec<VagueLine> {
    let mut found = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if indicators().iter().any(|re| re.is_match(line)) {
            found.push(VagueLine {
                line: index + 1,
                text: line.trim().to_string(),
            });
        }
    }
    found
}

/// Turn flagged lines into clarifying questions using fixed templates
/// keyed by the kind of vagueness observed.
pub fn suggest_clarifications(vague_lines: &[VagueLine]) -> Vec<String> {
    vague_lines
        .iter()
        .map(|item| {
            let lowered = item.text.to_lowercase();
            if ["maybe", "might", "could"].iter().any(|w| lowered.contains(w)) {
                format!("Please confirm: {} - Is this required or optional?", item.text)
            } else if ["some", "few", "many", "several"].iter().any(|w| lowered.contains(w)) {
                format!("Please specify exact quantity: {}", item.text)
            } else if lowered.contains("tbd") || lowered.contains("todo") {
                format!("Please provide details for: {}", item.text)
            } else {
                format!("Please clarify: {}", item.text)
            }
        })
        .collect()
}

/// Fraction of non-empty lines that carry no vagueness indicator,
/// clamped to `[0.0, 1.0]`. Text with no non-empty lines scores 1.0:
/// nothing vague was said.
pub fn clarity_score(text: &str) -> f64 {
    let non_empty = text.lines().filter(|line| !line.trim().is_empty()).count();
    if non_empty == 0 {
        return 1.0;
    }
    let vague = find_vague_lines(text).len();
    let score = 1.0 - (vague as f64 / non_empty as f64);
    score.clamp(0.0, 1.0)
}
