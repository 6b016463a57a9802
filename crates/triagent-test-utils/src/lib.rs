// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for triagent integration tests.
//!
//! Provides a harness that assembles a real ticket store on a temp
//! directory together with a router, plus fixture builders, for fast,
//! deterministic, CI-runnable tests without external services.

pub mod fixtures;
pub mod harness;

pub use fixtures::{reply_params, ticket_params};
pub use harness::TestStore;

/// Install a test subscriber honoring `RUST_LOG`, once per process.
///
/// Call at the top of a test to see store degradation warnings in
/// captured output.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
