// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full client stack — scan pipeline, usage
//! tracker, in-memory state store — around a [`MockGateway`], so tests can
//! drive complete scan/save/retake flows without a backend.

use std::sync::Arc;

use namecard_chat::ScanPipeline;
use namecard_config::model::LimitsConfig;
use namecard_core::types::{Contact, UsageSnapshot};
use namecard_core::NamecardError;
use namecard_store::StateDb;
use namecard_usage::UsageTracker;

use crate::mock_gateway::MockGateway;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    extractions: Vec<(Contact, bool)>,
    limits: LimitsConfig,
    usage: Option<UsageSnapshot>,
    fail_writes: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            extractions: Vec::new(),
            limits: LimitsConfig::default(),
            usage: None,
            fail_writes: false,
        }
    }

    /// Queue an extraction outcome on the mock gateway.
    pub fn with_extraction(mut self, contact: Contact, auto_saved: bool) -> Self {
        self.extractions.push((contact, auto_saved));
        self
    }

    /// Override the free-tier ceilings.
    pub fn with_limits(mut self, scans: u32, contacts: u32) -> Self {
        self.limits = LimitsConfig {
            free_scan_limit: scans,
            free_contact_limit: contacts,
        };
        self
    }

    /// Set the usage snapshot the mock backend reports.
    pub fn with_usage(mut self, snapshot: UsageSnapshot) -> Self {
        self.usage = Some(snapshot);
        self
    }

    /// Make save/update/delete calls fail.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Build the harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, NamecardError> {
        let gateway = Arc::new(MockGateway::new());
        for (contact, auto_saved) in self.extractions {
            gateway.push_extraction(contact, auto_saved);
        }
        if let Some(usage) = self.usage {
            gateway.set_usage(usage);
        }
        gateway.set_fail_writes(self.fail_writes);

        let db = StateDb::open_in_memory().await?;
        let tracker = UsageTracker::restore(&self.limits, &db).await?;
        let pipeline = ScanPipeline::new(gateway.clone());

        Ok(TestHarness {
            pipeline,
            tracker,
            gateway,
            db,
        })
    }
}

/// A complete client stack wired to a mock backend.
pub struct TestHarness {
    pub pipeline: ScanPipeline,
    pub tracker: UsageTracker,
    pub gateway: Arc<MockGateway>,
    pub db: StateDb,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A contact with the given id and name, as extractions produce them.
    pub fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: id.into(),
            name: name.into(),
            company: Some("Acme Corp".into()),
            title: Some("Engineer".into()),
            phone: Some("+1 555 0100".into()),
            email: Some("jane@acme.test".into()),
            notes: None,
            created_at: "2026-08-01T10:00:00Z".into(),
        }
    }
}
