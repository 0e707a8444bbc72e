// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock contact gateway for deterministic testing.
//!
//! `MockGateway` implements `ContactGateway` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without a backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use namecard_core::types::{Contact, ExtractOutcome, UsageSnapshot, UserProfile};
use namecard_core::{ContactGateway, NamecardError};

fn unreachable_backend() -> NamecardError {
    NamecardError::Gateway {
        message: "mock backend unreachable".into(),
        source: None,
    }
}

/// A mock backend gateway with scripted behavior.
///
/// Extraction outcomes are popped from a FIFO queue; an empty queue means
/// the backend is unreachable. Write operations succeed unless the
/// corresponding failure flag is set, and every accepted write is captured
/// for assertions.
pub struct MockGateway {
    extractions: Mutex<VecDeque<Result<ExtractOutcome, NamecardError>>>,
    fail_writes: AtomicBool,
    usage: Mutex<Option<UsageSnapshot>>,
    user: Mutex<Option<UserProfile>>,
    listed: Mutex<Vec<Contact>>,
    appended: Mutex<Vec<Contact>>,
    updated: Mutex<Vec<Contact>>,
    deleted: Mutex<Vec<String>>,
}

impl MockGateway {
    /// A gateway with nothing scripted: extractions fail as unreachable,
    /// writes succeed, reads return empty defaults.
    pub fn new() -> Self {
        Self {
            extractions: Mutex::new(VecDeque::new()),
            fail_writes: AtomicBool::new(false),
            usage: Mutex::new(None),
            user: Mutex::new(None),
            listed: Mutex::new(Vec::new()),
            appended: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful extraction outcome.
    pub fn push_extraction(&self, contact: Contact, auto_saved: bool) {
        self.extractions
            .lock()
            .unwrap()
            .push_back(Ok(ExtractOutcome {
                contact,
                auto_saved,
            }));
    }

    /// Queue a failed extraction.
    pub fn push_extraction_failure(&self) {
        self.extractions
            .lock()
            .unwrap()
            .push_back(Err(unreachable_backend()));
    }

    /// Make subsequent save/update/delete calls fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Set the usage snapshot the backend reports.
    pub fn set_usage(&self, snapshot: UsageSnapshot) {
        *self.usage.lock().unwrap() = Some(snapshot);
    }

    /// Set the authenticated user the backend reports.
    pub fn set_user(&self, user: UserProfile) {
        *self.user.lock().unwrap() = Some(user);
    }

    /// Set the contact list the backend returns.
    pub fn set_contacts(&self, contacts: Vec<Contact>) {
        *self.listed.lock().unwrap() = contacts;
    }

    /// Contacts accepted by `append_contact`, in call order.
    pub fn appended(&self) -> Vec<Contact> {
        self.appended.lock().unwrap().clone()
    }

    /// Contacts accepted by `update_contact`, in call order.
    pub fn updated(&self) -> Vec<Contact> {
        self.updated.lock().unwrap().clone()
    }

    /// Ids accepted by `delete_contact`, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn next_extraction(&self) -> Result<ExtractOutcome, NamecardError> {
        self.extractions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unreachable_backend()))
    }

    fn write_gate(&self) -> Result<(), NamecardError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(unreachable_backend())
        } else {
            Ok(())
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactGateway for MockGateway {
    async fn extract_from_image(
        &self,
        _image: Vec<u8>,
        _filename: &str,
    ) -> Result<ExtractOutcome, NamecardError> {
        self.next_extraction()
    }

    async fn extract_from_text(&self, _text: &str) -> Result<ExtractOutcome, NamecardError> {
        self.next_extraction()
    }

    async fn append_contact(&self, contact: &Contact) -> Result<(), NamecardError> {
        self.write_gate()?;
        self.appended.lock().unwrap().push(contact.clone());
        Ok(())
    }

    async fn update_contact(
        &self,
        _id: &str,
        contact: &Contact,
    ) -> Result<Contact, NamecardError> {
        self.write_gate()?;
        self.updated.lock().unwrap().push(contact.clone());
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: &str) -> Result<(), NamecardError> {
        self.write_gate()?;
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn list_contacts(
        &self,
        limit: Option<u32>,
        _offset: Option<u32>,
    ) -> Result<Vec<Contact>, NamecardError> {
        let contacts = self.listed.lock().unwrap().clone();
        match limit {
            Some(limit) => Ok(contacts.into_iter().take(limit as usize).collect()),
            None => Ok(contacts),
        }
    }

    async fn current_user(&self) -> Result<UserProfile, NamecardError> {
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or(NamecardError::Unauthorized)
    }

    async fn scan_usage(&self) -> Result<UsageSnapshot, NamecardError> {
        match *self.usage.lock().unwrap() {
            Some(snapshot) => Ok(snapshot),
            None => Err(unreachable_backend()),
        }
    }

    async fn logout(&self) -> Result<(), NamecardError> {
        Ok(())
    }
}
