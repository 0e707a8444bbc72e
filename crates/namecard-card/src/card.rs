// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Digital card lifecycle: created on the user's first edit, merged and
//! re-stamped on every edit after that. Never auto-created.

use namecard_core::types::DigitalCard;
use tracing::debug;

/// A partial edit to the digital card. `Some` fields are applied; `None`
/// fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct CardEdit {
    pub name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub show_phone: Option<bool>,
    pub linked_in: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub photo_url: Option<String>,
}

/// Apply an edit, creating the card if this is the user's first edit.
///
/// A created card gets a fresh id and both timestamps; an updated card
/// keeps its id and creation time and refreshes `updated_at`.
pub fn apply_edit(existing: Option<DigitalCard>, edit: CardEdit) -> DigitalCard {
    let now = chrono::Utc::now().to_rfc3339();
    let mut card = existing.unwrap_or_else(|| {
        debug!("creating digital card on first edit");
        DigitalCard {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            title: None,
            company: None,
            email: None,
            phone: None,
            show_phone: true,
            linked_in: None,
            instagram: None,
            twitter: None,
            website: None,
            photo_url: None,
            created_at: now.clone(),
            updated_at: now.clone(),
        }
    });

    if let Some(name) = edit.name {
        card.name = name;
    }
    if let Some(title) = edit.title {
        card.title = Some(title);
    }
    if let Some(company) = edit.company {
        card.company = Some(company);
    }
    if let Some(email) = edit.email {
        card.email = Some(email);
    }
    if let Some(phone) = edit.phone {
        card.phone = Some(phone);
    }
    if let Some(show_phone) = edit.show_phone {
        card.show_phone = show_phone;
    }
    if let Some(linked_in) = edit.linked_in {
        card.linked_in = Some(linked_in);
    }
    if let Some(instagram) = edit.instagram {
        card.instagram = Some(instagram);
    }
    if let Some(twitter) = edit.twitter {
        card.twitter = Some(twitter);
    }
    if let Some(website) = edit.website {
        card.website = Some(website);
    }
    if let Some(photo_url) = edit.photo_url {
        card.photo_url = Some(photo_url);
    }
    card.updated_at = now;
    card
}

/// The shareable URL for a card.
pub fn share_url(card: &DigitalCard, share_base_url: &str) -> String {
    format!("{}/card/{}", share_base_url.trim_end_matches('/'), card.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_edit_creates_the_card() {
        let card = apply_edit(
            None,
            CardEdit {
                name: Some("Jane Smith".into()),
                title: Some("Engineer".into()),
                ..Default::default()
            },
        );
        assert!(!card.id.is_empty());
        assert_eq!(card.name, "Jane Smith");
        assert_eq!(card.title.as_deref(), Some("Engineer"));
        assert!(card.show_phone);
        assert_eq!(card.created_at, card.updated_at);
    }

    #[test]
    fn later_edits_keep_identity_and_touch_updated_at() {
        let first = apply_edit(
            None,
            CardEdit {
                name: Some("Jane Smith".into()),
                ..Default::default()
            },
        );
        let second = apply_edit(
            Some(first.clone()),
            CardEdit {
                company: Some("Acme Corp".into()),
                show_phone: Some(false),
                ..Default::default()
            },
        );

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.name, "Jane Smith");
        assert_eq!(second.company.as_deref(), Some("Acme Corp"));
        assert!(!second.show_phone);
    }

    #[test]
    fn untouched_fields_survive_an_edit() {
        let first = apply_edit(
            None,
            CardEdit {
                name: Some("Jane".into()),
                email: Some("jane@acme.test".into()),
                ..Default::default()
            },
        );
        let second = apply_edit(
            Some(first),
            CardEdit {
                title: Some("Engineer".into()),
                ..Default::default()
            },
        );
        assert_eq!(second.email.as_deref(), Some("jane@acme.test"));
    }

    #[test]
    fn share_url_joins_base_and_id() {
        let card = apply_edit(
            None,
            CardEdit {
                name: Some("Jane".into()),
                ..Default::default()
            },
        );
        let url = share_url(&card, "https://namecard.app/");
        assert_eq!(url, format!("https://namecard.app/card/{}", card.id));
    }
}
