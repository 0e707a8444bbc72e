// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-oriented cache of previously saved contacts.
//!
//! Independent of the message log: refreshed separately from the backend,
//! with optimistic local inserts for contacts saved in this session. A
//! failed refresh keeps the previous snapshot and records a user-facing
//! error string instead of clearing the list.

use namecard_core::types::Contact;
use namecard_core::{ContactGateway, NamecardError};
use tracing::{debug, warn};

const FETCH_FAILED: &str = "Unable to load contacts. Please check your connection.";

/// Cached list of previously saved contacts, newest first.
#[derive(Default)]
pub struct ContactHistory {
    contacts: Vec<Contact>,
    error: Option<String>,
}

impl ContactHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The user-facing error from the last refresh, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the snapshot from the backend.
    ///
    /// `Unauthorized` propagates; any other failure keeps the previous
    /// snapshot and sets [`Self::error`].
    pub async fn refresh(
        &mut self,
        gateway: &dyn ContactGateway,
        limit: Option<u32>,
    ) -> Result<(), NamecardError> {
        match gateway.list_contacts(limit, None).await {
            Ok(contacts) => {
                debug!(count = contacts.len(), "contact history refreshed");
                self.contacts = contacts;
                self.error = None;
                Ok(())
            }
            Err(NamecardError::Unauthorized) => Err(NamecardError::Unauthorized),
            Err(e) => {
                warn!(error = %e, "contact history refresh failed");
                self.error = Some(FETCH_FAILED.to_string());
                Ok(())
            }
        }
    }

    /// Prepend a contact saved in this session, replacing any stale copy
    /// with the same id.
    pub fn insert_local(&mut self, contact: Contact) {
        self.contacts.retain(|c| c.id != contact.id);
        self.contacts.insert(0, contact);
    }

    /// Delete a contact from the backend store, removing it locally on
    /// success. Returns whether the deletion went through.
    pub async fn delete(
        &mut self,
        gateway: &dyn ContactGateway,
        id: &str,
    ) -> Result<bool, NamecardError> {
        match gateway.delete_contact(id).await {
            Ok(()) => {
                self.contacts.retain(|c| c.id != id);
                Ok(true)
            }
            Err(NamecardError::Unauthorized) => Err(NamecardError::Unauthorized),
            Err(e) => {
                warn!(contact_id = id, error = %e, "contact delete failed");
                Ok(false)
            }
        }
    }
}
