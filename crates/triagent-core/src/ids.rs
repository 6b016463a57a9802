// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifier and timestamp generation.
//!
//! Ticket and reply ids combine a zero-padded millisecond timestamp with
//! a random alphanumeric suffix behind a short type prefix, so sorting
//! ids lexicographically approximates chronological order. Actual
//! ordering always uses the explicit timestamp fields, never the id.

use rand::distributions::Alphanumeric;
use rand::Rng;

const SUFFIX_LEN: usize = 6;

/// Millisecond-precision UTC timestamp in ISO 8601 form.
///
/// The format is fixed-width, so lexicographic order equals
/// chronological order.
pub fn now_iso() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// Generate a new ticket identifier, e.g. `tkt-0001772312345678-x4g9ka`.
pub fn new_ticket_id() -> String {
    prefixed_id("tkt")
}

/// Generate a new reply identifier, e.g. `rpl-0001772312345678-p0cz2m`.
pub fn new_reply_id() -> String {
    prefixed_id("rpl")
}

fn prefixed_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{prefix}-{millis:016}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_type_prefix_and_fixed_width() {
        let tid = new_ticket_id();
        let rid = new_reply_id();
        assert!(tid.starts_with("tkt-"));
        assert!(rid.starts_with("rpl-"));
        assert_eq!(tid.len(), "tkt-".len() + 16 + 1 + SUFFIX_LEN);
        assert_eq!(rid.len(), "rpl-".len() + 16 + 1 + SUFFIX_LEN);
    }

    #[test]
    fn ids_are_unique_under_rapid_generation() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(new_ticket_id()));
        }
    }

    #[test]
    fn now_iso_orders_lexicographically() {
        let a = now_iso();
        let b = now_iso();
        assert!(a <= b);
        assert!(a.ends_with('Z'));
    }
}
