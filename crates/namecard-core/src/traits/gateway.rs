// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway trait for the contact backend.
//!
//! The pipeline and CLI only speak to the backend through this trait, so
//! tests substitute a mock and the HTTP implementation stays in one crate.

use async_trait::async_trait;

use crate::error::NamecardError;
use crate::types::{Contact, ExtractOutcome, UsageSnapshot, UserProfile};

/// Adapter for the remote contact backend (extraction AI, contact store,
/// auth session, usage counters).
///
/// Every method is a single attempt: no retry or backoff is performed at
/// this seam. A 401 from any endpoint maps to
/// [`NamecardError::Unauthorized`]; other failures map to
/// [`NamecardError::Gateway`] and never panic into the caller.
#[async_trait]
pub trait ContactGateway: Send + Sync {
    /// Extract a structured contact from a captured card photo.
    async fn extract_from_image(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<ExtractOutcome, NamecardError>;

    /// Extract a structured contact from free-form typed text.
    async fn extract_from_text(&self, text: &str) -> Result<ExtractOutcome, NamecardError>;

    /// Append a contact to the user's contact store.
    async fn append_contact(&self, contact: &Contact) -> Result<(), NamecardError>;

    /// Update an existing contact; returns the now-canonical record.
    async fn update_contact(
        &self,
        id: &str,
        contact: &Contact,
    ) -> Result<Contact, NamecardError>;

    /// Delete a contact from the user's contact store.
    async fn delete_contact(&self, id: &str) -> Result<(), NamecardError>;

    /// List previously saved contacts, newest first.
    async fn list_contacts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Contact>, NamecardError>;

    /// Fetch the currently authenticated user.
    async fn current_user(&self) -> Result<UserProfile, NamecardError>;

    /// Fetch authoritative usage counters.
    async fn scan_usage(&self) -> Result<UsageSnapshot, NamecardError>;

    /// Best-effort server-side session teardown.
    async fn logout(&self) -> Result<(), NamecardError>;
}
