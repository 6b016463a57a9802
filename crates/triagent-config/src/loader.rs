// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./triagent.toml` > `~/.config/triagent/triagent.toml`
//! > `/etc/triagent/triagent.toml` with environment variable overrides via
//! the `TRIAGENT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TriagentConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/triagent/triagent.toml` (system-wide)
/// 3. `~/.config/triagent/triagent.toml` (user XDG config)
/// 4. `./triagent.toml` (local directory)
/// 5. `TRIAGENT_*` environment variables
pub fn load_config() -> Result<TriagentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagentConfig::default()))
        .merge(Toml::file("/etc/triagent/triagent.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("triagent/triagent.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("triagent.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for callers that carry their own config text.
pub fn load_config_from_str(toml_content: &str) -> Result<TriagentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagentConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriagentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagentConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TRIAGENT_STORAGE_DATA_DIR` must map
/// to `storage.data_dir`, not `storage.data.dir`.
fn env_provider() -> Env {
    Env::prefixed("TRIAGENT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TRIAGENT_STORAGE_DATA_DIR -> "storage_data_dir"
        let mapped = key
            .as_str()
            .replacen("agent_", "agent.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
