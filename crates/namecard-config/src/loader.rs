// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./namecard.toml` > `~/.config/namecard/namecard.toml` > `/etc/namecard/namecard.toml`
//! with environment variable overrides via `NAMECARD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::NamecardConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/namecard/namecard.toml` (system-wide)
/// 3. `~/.config/namecard/namecard.toml` (user XDG config)
/// 4. `./namecard.toml` (local directory)
/// 5. `NAMECARD_*` environment variables
pub fn load_config() -> Result<NamecardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NamecardConfig::default()))
        .merge(Toml::file("/etc/namecard/namecard.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("namecard/namecard.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("namecard.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<NamecardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NamecardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<NamecardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NamecardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `NAMECARD_API_BASE_URL` must
/// map to `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("NAMECARD_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped, lowercased env var name to its dotted config key.
/// Example: "api_base_url" -> "api.base_url".
fn map_env_key(key: &str) -> String {
    key.replacen("agent_", "agent.", 1)
        .replacen("api_", "api.", 1)
        .replacen("storage_", "storage.", 1)
        .replacen("limits_", "limits.", 1)
        .replacen("card_", "card.", 1)
}
