// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached usage counters, re-hydrated by the quota tracker on startup.

use namecard_core::NamecardError;
use rusqlite::OptionalExtension;

use crate::database::{storage_err, StateDb};
use crate::models::CachedUsage;

/// Store the usage cache, replacing the previous row.
pub async fn save_usage(db: &StateDb, usage: &CachedUsage) -> Result<(), NamecardError> {
    let usage = usage.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO usage_cache (id, scans_used, contacts_saved, is_premium, fetched_at) \
                 VALUES (1, ?1, ?2, ?3, ?4) \
                 ON CONFLICT(id) DO UPDATE SET scans_used = excluded.scans_used, \
                 contacts_saved = excluded.contacts_saved, \
                 is_premium = excluded.is_premium, \
                 fetched_at = excluded.fetched_at",
                rusqlite::params![
                    usage.scans_used,
                    usage.contacts_saved,
                    usage.is_premium,
                    usage.fetched_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(storage_err)
}

/// Load the cached usage counters, if any run has persisted them yet.
pub async fn load_usage(db: &StateDb) -> Result<Option<CachedUsage>, NamecardError> {
    db.connection()
        .call(|conn| -> Result<Option<CachedUsage>, rusqlite::Error> {
            conn.query_row(
                "SELECT scans_used, contacts_saved, is_premium, fetched_at \
                 FROM usage_cache WHERE id = 1",
                [],
                |row| {
                    Ok(CachedUsage {
                        scans_used: row.get(0)?,
                        contacts_saved: row.get(1)?,
                        is_premium: row.get(2)?,
                        fetched_at: row.get(3)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(storage_err)
}
