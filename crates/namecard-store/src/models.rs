// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locally cached state shapes.
//!
//! The canonical domain types live in `namecard-core::types`; this module
//! adds the store-only wrapper that stamps a snapshot with its fetch time.

use namecard_core::types::UsageSnapshot;

/// Usage counters as cached locally, plus the authoritative-since marker.
///
/// `fetched_at` is `None` until the first successful backend fetch; until
/// then the counters only reflect optimistic local increments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedUsage {
    pub scans_used: u32,
    pub contacts_saved: u32,
    pub is_premium: bool,
    /// ISO 8601 timestamp of the last successful backend fetch.
    pub fetched_at: Option<String>,
}

impl CachedUsage {
    /// A zeroed cache for first-run state.
    pub fn empty() -> Self {
        Self {
            scans_used: 0,
            contacts_saved: 0,
            is_premium: false,
            fetched_at: None,
        }
    }

    /// Replace the cached counters wholesale with an authoritative snapshot.
    pub fn from_snapshot(snapshot: UsageSnapshot, fetched_at: String) -> Self {
        Self {
            scans_used: snapshot.scans_used,
            contacts_saved: snapshot.contacts_saved,
            is_premium: snapshot.is_premium,
            fetched_at: Some(fetched_at),
        }
    }
}
