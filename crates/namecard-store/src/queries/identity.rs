// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached authenticated identity, replaced wholesale on every auth check.

use namecard_core::types::UserProfile;
use namecard_core::NamecardError;
use rusqlite::OptionalExtension;
use tracing::debug;

use crate::database::{storage_err, StateDb};

/// Store the authenticated user, replacing any previous identity.
pub async fn save_identity(db: &StateDb, profile: &UserProfile) -> Result<(), NamecardError> {
    let json = serde_json::to_string(profile).map_err(storage_err)?;
    let updated_at = chrono::Utc::now().to_rfc3339();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO identity (id, profile, updated_at) VALUES (1, ?1, ?2) \
                 ON CONFLICT(id) DO UPDATE SET profile = excluded.profile, \
                 updated_at = excluded.updated_at",
                rusqlite::params![json, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;

    debug!("cached identity updated");
    Ok(())
}

/// Load the cached identity, if any.
pub async fn load_identity(db: &StateDb) -> Result<Option<UserProfile>, NamecardError> {
    let json: Option<String> = db
        .connection()
        .call(|conn| -> Result<Option<String>, rusqlite::Error> {
            conn.query_row("SELECT profile FROM identity WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
        })
        .await
        .map_err(storage_err)?;

    match json {
        Some(json) => {
            let profile = serde_json::from_str(&json).map_err(storage_err)?;
            Ok(Some(profile))
        }
        None => Ok(None),
    }
}

/// Drop the cached identity (logout, or the backend said 401).
pub async fn clear_identity(db: &StateDb) -> Result<(), NamecardError> {
    db.connection()
        .call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM identity WHERE id = 1", [])?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;

    debug!("cached identity cleared");
    Ok(())
}
