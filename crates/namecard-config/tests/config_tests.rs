// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Namecard configuration system.

use namecard_config::diagnostic::ConfigError;
use namecard_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_namecard_config() {
    let toml = r#"
[agent]
name = "test-client"
log_level = "debug"

[api]
base_url = "http://localhost:8000"
timeout_secs = 10

[storage]
database_path = "/tmp/namecard-test.db"

[limits]
free_scan_limit = 5
free_contact_limit = 7

[card]
share_base_url = "http://localhost:3000"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-client");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.storage.database_path, "/tmp/namecard-test.db");
    assert_eq!(config.limits.free_scan_limit, 5);
    assert_eq!(config.limits.free_contact_limit, 7);
    assert_eq!(config.card.share_base_url, "http://localhost:3000");
}

/// Empty TOML falls back to compiled defaults everywhere.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty config should be valid");
    assert_eq!(config.agent.name, "namecard");
    assert_eq!(config.limits.free_scan_limit, 15);
    assert_eq!(config.limits.free_contact_limit, 25);
}

/// Unknown field in a section produces an UnknownKey error with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[api]
base_ur = "http://localhost:8000"
"#;

    let errors = load_and_validate_str(toml).expect_err("typo should be rejected");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey { key, suggestion, .. } => {
                Some((key.clone(), suggestion.clone()))
            }
            _ => None,
        })
        .expect("should produce an UnknownKey error");
    assert_eq!(unknown.0, "base_ur");
    assert_eq!(unknown.1.as_deref(), Some("base_url"));
}

/// Wrong value type produces an InvalidType error, not a panic.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[limits]
free_scan_limit = "plenty"
"#;

    let errors = load_and_validate_str(toml).expect_err("string for u32 should fail");
    assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "expected InvalidType, got: {errors:?}");
}

/// Semantic validation rejects values serde cannot catch.
#[test]
fn semantic_validation_runs_after_deserialization() {
    let toml = r#"
[api]
base_url = "not-a-url"
"#;

    let errors = load_and_validate_str(toml).expect_err("bad URL should be rejected");
    assert!(errors.iter().any(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;

    assert!(load_and_validate_str(toml).is_err());
}
