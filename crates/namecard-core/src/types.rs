// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical domain types shared across the Namecard client crates.
//!
//! Wire field names are camelCase (the backend contract); Rust field names
//! are snake_case with serde renames at the struct level.

use serde::{Deserialize, Serialize};

use crate::error::NamecardError;

/// Unique identifier for a conversation turn, generated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub String);

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One extracted or saved business-card contact.
///
/// `id` is opaque and may be assigned by either side; it is unique within
/// the message log and within the history cache. `name` may be empty while
/// the user is editing, but a save against an empty name is a caller error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// ISO 8601, set at extraction time.
    pub created_at: String,
}

impl Contact {
    /// Client-side gate for save/update calls. The backend remains the
    /// source of truth for rejection; this blocks the obvious caller error
    /// before any network traffic.
    pub fn validate_for_save(&self) -> Result<(), NamecardError> {
        if self.name.trim().is_empty() {
            return Err(NamecardError::InvalidContact(
                "contact name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// The authenticated user as reported by `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Identifier of the spreadsheet-backed contact store bound to this account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_url: Option<String>,
}

/// The user's own shareable digital card. One per user; created on first
/// edit, never auto-created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalCard {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether the phone number is included when the card is shared.
    pub show_phone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of one extraction call against the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOutcome {
    pub contact: Contact,
    /// True when the backend already persisted the contact as part of the
    /// extraction call.
    #[serde(default)]
    pub auto_saved: bool,
}

/// Usage counters as reported by `GET /api/user/scan-usage`.
///
/// The backend copy is authoritative; the client holds a cached snapshot
/// with optimistic local increments between fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    #[serde(default)]
    pub scans_used: u32,
    #[serde(default)]
    pub contacts_saved: u32,
    #[serde(default)]
    pub is_premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> Contact {
        Contact {
            id: "c-1".into(),
            name: name.into(),
            company: Some("Acme Corp".into()),
            title: None,
            phone: None,
            email: Some("jane@acme.test".into()),
            notes: None,
            created_at: "2026-08-01T10:00:00Z".into(),
        }
    }

    #[test]
    fn contact_wire_names_are_camel_case() {
        let json = serde_json::to_value(contact("Jane Smith")).unwrap();
        assert_eq!(json["createdAt"], "2026-08-01T10:00:00Z");
        assert!(json.get("created_at").is_none());
        // Unset optionals are omitted entirely, matching the backend contract.
        assert!(json.get("title").is_none());
    }

    #[test]
    fn contact_roundtrip() {
        let original = contact("Jane Smith");
        let json = serde_json::to_string(&original).unwrap();
        let parsed: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn validate_for_save_rejects_empty_name() {
        let c = contact("   ");
        let err = c.validate_for_save().unwrap_err();
        assert!(matches!(err, NamecardError::InvalidContact(_)));
        assert!(contact("Jane").validate_for_save().is_ok());
    }

    #[test]
    fn extract_outcome_auto_saved_defaults_false() {
        let json = r#"{"contact":{"id":"c1","name":"Jane","createdAt":"2026-08-01T00:00:00Z"}}"#;
        let outcome: ExtractOutcome = serde_json::from_str(json).unwrap();
        assert!(!outcome.auto_saved);
        assert_eq!(outcome.contact.name, "Jane");
    }

    #[test]
    fn usage_snapshot_tolerates_missing_fields() {
        let snapshot: UsageSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.scans_used, 0);
        assert!(!snapshot.is_premium);
    }
}
