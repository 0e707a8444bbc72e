// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quota tracking against the free-tier ceilings.
//!
//! The tracker keeps cached counters and gates scan/save actions; premium
//! accounts bypass both gates unconditionally. The backend is the source
//! of truth: a successful fetch replaces local state wholesale, a failed
//! fetch is silently tolerated and the stale counters stay authoritative
//! (fail-open, so a transient network error never blocks the user).
//! Local increments are advisory and overwritten by the next fetch.
//!
//! On startup, `restore()` re-hydrates counters from the state store so
//! quota enforcement is continuous across runs.

use namecard_config::model::LimitsConfig;
use namecard_core::{ContactGateway, NamecardError};
use namecard_store::queries::usage;
use namecard_store::{CachedUsage, StateDb};
use tracing::{debug, warn};

/// Cached usage counters with free-tier gates.
pub struct UsageTracker {
    usage: CachedUsage,
    scan_limit: u32,
    contact_limit: u32,
}

impl UsageTracker {
    /// A tracker with zeroed counters (first run, nothing cached).
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            usage: CachedUsage::empty(),
            scan_limit: limits.free_scan_limit,
            contact_limit: limits.free_contact_limit,
        }
    }

    /// Re-hydrate the tracker from the state store.
    pub async fn restore(limits: &LimitsConfig, db: &StateDb) -> Result<Self, NamecardError> {
        let usage = usage::load_usage(db).await?.unwrap_or_else(CachedUsage::empty);
        Ok(Self {
            usage,
            scan_limit: limits.free_scan_limit,
            contact_limit: limits.free_contact_limit,
        })
    }

    pub fn scans_used(&self) -> u32 {
        self.usage.scans_used
    }

    pub fn contacts_saved(&self) -> u32 {
        self.usage.contacts_saved
    }

    pub fn is_premium(&self) -> bool {
        self.usage.is_premium
    }

    /// When the counters were last confirmed by the backend, if ever.
    pub fn last_fetched(&self) -> Option<&str> {
        self.usage.fetched_at.as_deref()
    }

    /// Whether another extraction is allowed.
    pub fn can_scan(&self) -> bool {
        self.usage.is_premium || self.usage.scans_used < self.scan_limit
    }

    /// Whether another contact save is allowed.
    pub fn can_save_contact(&self) -> bool {
        self.usage.is_premium || self.usage.contacts_saved < self.contact_limit
    }

    /// Remaining extractions; `None` means unbounded (premium).
    pub fn remaining_scans(&self) -> Option<u32> {
        if self.usage.is_premium {
            None
        } else {
            Some(self.scan_limit.saturating_sub(self.usage.scans_used))
        }
    }

    /// Remaining contact saves; `None` means unbounded (premium).
    pub fn remaining_contacts(&self) -> Option<u32> {
        if self.usage.is_premium {
            None
        } else {
            Some(self.contact_limit.saturating_sub(self.usage.contacts_saved))
        }
    }

    /// The error returned when a scan is attempted at the ceiling.
    pub fn scan_quota_error(&self) -> NamecardError {
        NamecardError::QuotaExceeded {
            kind: "scans".into(),
            used: self.usage.scans_used,
            limit: self.scan_limit,
        }
    }

    /// Refresh counters from the backend.
    ///
    /// On success the cached state is replaced wholesale (any optimistic
    /// drift is discarded) and persisted. On failure the cached state is
    /// left untouched and `false` is returned; the failure is never
    /// propagated.
    pub async fn fetch(&mut self, gateway: &dyn ContactGateway, db: &StateDb) -> bool {
        match gateway.scan_usage().await {
            Ok(snapshot) => {
                let fetched_at = chrono::Utc::now().to_rfc3339();
                self.usage = CachedUsage::from_snapshot(snapshot, fetched_at);
                self.persist(db).await;
                debug!(
                    scans_used = self.usage.scans_used,
                    contacts_saved = self.usage.contacts_saved,
                    is_premium = self.usage.is_premium,
                    "usage refreshed from backend"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "usage fetch failed, keeping cached counters");
                false
            }
        }
    }

    /// Optimistic local increment after a successful extraction.
    pub async fn record_scan(&mut self, db: &StateDb) {
        self.usage.scans_used += 1;
        self.persist(db).await;
    }

    /// Optimistic local increment after a successful contact save.
    pub async fn record_contact_saved(&mut self, db: &StateDb) {
        self.usage.contacts_saved += 1;
        self.persist(db).await;
    }

    /// Best-effort persistence of the cache; counter state is advisory so
    /// a store failure is logged, not propagated.
    async fn persist(&self, db: &StateDb) {
        if let Err(e) = usage::save_usage(db, &self.usage).await {
            warn!(error = %e, "failed to persist usage cache");
        }
    }
}
