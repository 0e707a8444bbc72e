// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as well-formed URLs, non-empty paths, and positive
//! timeouts.

use crate::diagnostic::ConfigError;
use crate::model::NamecardConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &NamecardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    validate_http_url("api.base_url", &config.api.base_url, &mut errors);
    validate_http_url("card.share_base_url", &config.card.share_base_url, &mut errors);

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be greater than zero".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.limits.free_scan_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.free_scan_limit must be greater than zero".to_string(),
        });
    }

    if config.limits.free_contact_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.free_contact_limit must be greater than zero".to_string(),
        });
    }

    let level = config.agent.log_level.trim();
    if !matches!(level, "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{level}` is not one of trace, debug, info, warn, error"
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Require an http(s) URL with a non-empty host and no trailing slash noise.
fn validate_http_url(key: &str, value: &str, errors: &mut Vec<ConfigError>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ConfigError::Validation {
            message: format!("{key} must not be empty"),
        });
        return;
    }

    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => {}
        _ => errors.push(ConfigError::Validation {
            message: format!("{key} `{trimmed}` must be an http(s) URL"),
        }),
    }
}
