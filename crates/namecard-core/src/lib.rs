// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Namecard business-card client.
//!
//! Provides the error enum, the canonical domain types (contact, user
//! profile, digital card, usage snapshot), and the [`ContactGateway`]
//! trait the HTTP backend adapter implements.

pub mod error;
pub mod traits;
pub mod types;

pub use error::NamecardError;
pub use traits::ContactGateway;
pub use types::{Contact, DigitalCard, ExtractOutcome, TurnId, UsageSnapshot, UserProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_render() {
        let e = NamecardError::Unauthorized;
        assert!(e.is_unauthorized());
        assert_eq!(e.to_string(), "not signed in or session expired");

        let e = NamecardError::QuotaExceeded {
            kind: "scans".into(),
            used: 15,
            limit: 15,
        };
        assert_eq!(e.to_string(), "free-tier limit reached: 15/15 scans");

        let e = NamecardError::Gateway {
            message: "boom".into(),
            source: None,
        };
        assert!(!e.is_unauthorized());
        assert_eq!(e.to_string(), "gateway error: boom");
    }

    #[test]
    fn turn_id_display_and_hash() {
        use std::collections::HashMap;

        let id = TurnId("t-1".into());
        assert_eq!(id.to_string(), "t-1");

        let mut map = HashMap::new();
        map.insert(id.clone(), 1);
        assert_eq!(map.get(&TurnId("t-1".into())), Some(&1));
    }
}
