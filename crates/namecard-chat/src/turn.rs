// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation turn types.
//!
//! A bot turn's lifecycle is a tagged variant rather than a set of boolean
//! flags, so "pending and resolved" or "saved and awaiting confirmation"
//! cannot be represented at all.

use namecard_core::types::{Contact, TurnId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the conversation a turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TurnKind {
    User,
    Bot,
    System,
}

/// Reference to a captured card photo, for display. The raw bytes go to
/// the gateway and are not retained in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(pub String);

/// Persistence state of a resolved extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistState {
    /// Extracted but not yet written to the contact store.
    Unsaved,
    /// Durably persisted; confirmed by a backend response.
    Saved,
    /// Displayed contact diverges from (or was never written to) the
    /// persisted record; an explicit user save is required.
    AwaitingConfirmation,
}

/// Resolution state of a bot turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BotState {
    /// Awaiting the extraction response.
    Pending,
    /// Extraction resolved without a contact.
    Failed { message: String },
    /// Extraction resolved with a contact.
    Resolved {
        note: String,
        contact: Contact,
        persistence: PersistState,
    },
}

/// The payload of one conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnBody {
    User {
        text: Option<String>,
        image: Option<ImageRef>,
    },
    Bot(BotState),
    System {
        text: String,
    },
}

/// One turn in the conversation between the user and the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: TurnId,
    pub body: TurnBody,
    /// ISO 8601, assigned by the log at append time.
    pub created_at: String,
}

impl ChatTurn {
    pub fn kind(&self) -> TurnKind {
        match self.body {
            TurnBody::User { .. } => TurnKind::User,
            TurnBody::Bot(_) => TurnKind::Bot,
            TurnBody::System { .. } => TurnKind::System,
        }
    }

    /// True for a bot turn still awaiting its extraction response.
    pub fn is_pending(&self) -> bool {
        matches!(self.body, TurnBody::Bot(BotState::Pending))
    }

    /// True once the associated contact is durably persisted.
    pub fn is_saved(&self) -> bool {
        matches!(
            self.body,
            TurnBody::Bot(BotState::Resolved {
                persistence: PersistState::Saved,
                ..
            })
        )
    }

    /// True when the displayed contact requires an explicit user save.
    pub fn needs_confirmation(&self) -> bool {
        matches!(
            self.body,
            TurnBody::Bot(BotState::Resolved {
                persistence: PersistState::AwaitingConfirmation,
                ..
            })
        )
    }

    /// The extracted contact, for resolved bot turns.
    pub fn contact(&self) -> Option<&Contact> {
        match &self.body {
            TurnBody::Bot(BotState::Resolved { contact, .. }) => Some(contact),
            _ => None,
        }
    }

    /// The display text of this turn, if it has one.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            TurnBody::User { text, .. } => text.as_deref(),
            TurnBody::System { text } => Some(text),
            TurnBody::Bot(BotState::Failed { message }) => Some(message),
            TurnBody::Bot(BotState::Resolved { note, .. }) => Some(note),
            TurnBody::Bot(BotState::Pending) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> Contact {
        Contact {
            id: "c-1".into(),
            name: "Jane".into(),
            company: None,
            title: None,
            phone: None,
            email: None,
            notes: None,
            created_at: "2026-08-01T10:00:00Z".into(),
        }
    }

    fn turn(body: TurnBody) -> ChatTurn {
        ChatTurn {
            id: TurnId("t-1".into()),
            body,
            created_at: "2026-08-01T10:00:00Z".into(),
        }
    }

    #[test]
    fn saved_and_needs_confirmation_are_exclusive_by_construction() {
        // A single PersistState value backs both accessors, so the illegal
        // combination has no representation.
        for persistence in [
            PersistState::Unsaved,
            PersistState::Saved,
            PersistState::AwaitingConfirmation,
        ] {
            let t = turn(TurnBody::Bot(BotState::Resolved {
                note: "found it".into(),
                contact: contact(),
                persistence,
            }));
            assert!(!(t.is_saved() && t.needs_confirmation()));
        }
    }

    #[test]
    fn pending_turn_has_no_contact() {
        let t = turn(TurnBody::Bot(BotState::Pending));
        assert!(t.is_pending());
        assert!(t.contact().is_none());
        assert!(t.text().is_none());
    }

    #[test]
    fn kind_matches_body() {
        assert_eq!(
            turn(TurnBody::System { text: "hi".into() }).kind(),
            TurnKind::System
        );
        assert_eq!(
            turn(TurnBody::User {
                text: Some("hello".into()),
                image: None
            })
            .kind(),
            TurnKind::User
        );
        assert_eq!(turn(TurnBody::Bot(BotState::Pending)).kind(), TurnKind::Bot);
    }

    #[test]
    fn turn_kind_string_roundtrip() {
        use std::str::FromStr;
        for kind in [TurnKind::User, TurnKind::Bot, TurnKind::System] {
            let s = kind.to_string();
            assert_eq!(TurnKind::from_str(&s).unwrap(), kind);
        }
        assert_eq!(TurnKind::Bot.to_string(), "bot");
    }
}
