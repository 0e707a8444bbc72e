// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Namecard client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Namecard configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamecardConfig {
    /// Client identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Contact backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local state store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Free-tier quota ceilings.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Digital card sharing settings.
    #[serde(default)]
    pub card: CardConfig,
}

/// Client identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the conversation greeting.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "namecard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Contact backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the contact backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://namecard.app".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Local state store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite state database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("namecard").join("namecard.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("namecard.db"))
        .to_string_lossy()
        .into_owned()
}

/// Free-tier quota configuration.
///
/// The ceilings gate scans and contact saves for non-premium accounts.
/// Premium accounts bypass both regardless of these values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum extractions for a free-tier account.
    #[serde(default = "default_free_scan_limit")]
    pub free_scan_limit: u32,

    /// Maximum saved contacts for a free-tier account.
    #[serde(default = "default_free_contact_limit")]
    pub free_contact_limit: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            free_scan_limit: default_free_scan_limit(),
            free_contact_limit: default_free_contact_limit(),
        }
    }
}

fn default_free_scan_limit() -> u32 {
    15
}

fn default_free_contact_limit() -> u32 {
    25
}

/// Digital card sharing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CardConfig {
    /// Base URL that share links are built against.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            share_base_url: default_share_base_url(),
        }
    }
}

fn default_share_base_url() -> String {
    "https://namecard.app".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        let config = NamecardConfig::default();
        assert_eq!(config.agent.name, "namecard");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.api.base_url, "https://namecard.app");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.limits.free_scan_limit, 15);
        assert_eq!(config.limits.free_contact_limit, 25);
        assert!(config.storage.database_path.ends_with("namecard.db"));
    }
}
