// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triagent ticket routing engine.

use thiserror::Error;

/// The primary error type used across Triagent core operations.
///
/// Environmental failures inside the ticket store (backend unavailable,
/// write failure, corrupted rows) are absorbed into fallback behavior and
/// never reach callers of the public store operations; this type is used
/// by the internal query layer and by configuration loading.
#[derive(Debug, Error)]
pub enum TriagentError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, migration, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
