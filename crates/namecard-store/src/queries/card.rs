// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The user's digital card, stored as a single JSON row.

use namecard_core::types::DigitalCard;
use namecard_core::NamecardError;
use rusqlite::OptionalExtension;

use crate::database::{storage_err, StateDb};

/// Store the digital card, replacing any previous version.
pub async fn save_card(db: &StateDb, card: &DigitalCard) -> Result<(), NamecardError> {
    let json = serde_json::to_string(card).map_err(storage_err)?;
    let updated_at = card.updated_at.clone();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO digital_card (id, card, updated_at) VALUES (1, ?1, ?2) \
                 ON CONFLICT(id) DO UPDATE SET card = excluded.card, \
                 updated_at = excluded.updated_at",
                rusqlite::params![json, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(storage_err)
}

/// Load the digital card, if the user has created one.
pub async fn load_card(db: &StateDb) -> Result<Option<DigitalCard>, NamecardError> {
    let json: Option<String> = db
        .connection()
        .call(|conn| -> Result<Option<String>, rusqlite::Error> {
            conn.query_row("SELECT card FROM digital_card WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
        })
        .await
        .map_err(storage_err)?;

    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json).map_err(storage_err)?)),
        None => Ok(None),
    }
}

/// Delete the digital card.
pub async fn clear_card(db: &StateDb) -> Result<(), NamecardError> {
    db.connection()
        .call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM digital_card WHERE id = 1", [])?;
            Ok(())
        })
        .await
        .map_err(storage_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> DigitalCard {
        DigitalCard {
            id: "card-1".into(),
            name: "Jane Smith".into(),
            title: Some("Engineer".into()),
            company: Some("Acme Corp".into()),
            email: Some("jane@acme.test".into()),
            phone: Some("+1 555 0100".into()),
            show_phone: true,
            linked_in: None,
            instagram: None,
            twitter: None,
            website: Some("https://jane.example".into()),
            photo_url: None,
            created_at: "2026-08-01T10:00:00Z".into(),
            updated_at: "2026-08-01T10:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn save_load_clear_cycle() {
        let db = StateDb::open_in_memory().await.unwrap();
        assert_eq!(load_card(&db).await.unwrap(), None);

        save_card(&db, &card()).await.unwrap();
        assert_eq!(load_card(&db).await.unwrap(), Some(card()));

        clear_card(&db).await.unwrap();
        assert_eq!(load_card(&db).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_replaces_existing_card() {
        let db = StateDb::open_in_memory().await.unwrap();
        save_card(&db, &card()).await.unwrap();

        let mut updated = card();
        updated.title = Some("Staff Engineer".into());
        updated.updated_at = "2026-08-02T09:00:00Z".into();
        save_card(&db, &updated).await.unwrap();

        let loaded = load_card(&db).await.unwrap().unwrap();
        assert_eq!(loaded.title.as_deref(), Some("Staff Engineer"));
        assert_eq!(loaded.updated_at, "2026-08-02T09:00:00Z");
    }
}
