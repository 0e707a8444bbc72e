// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction orchestrator: drives one capture from raw input to a
//! resolved log turn, and manages the retake protocol.
//!
//! Per attempt: user turn + pending bot turn are appended, the gateway is
//! called once, and the pending turn is patched in place with either the
//! extracted contact or a fixed failure message. Fresh captures hand off
//! to the persistence coordinator for auto-save; retakes and edits wait
//! for explicit confirmation.
//!
//! The orchestrator holds a single `is_processing` gate for the whole
//! pipeline. `&mut self` on the submit methods means attempts cannot
//! actually overlap in-process; the flag exists for front ends to disable
//! their send affordance. Retake is refused while an attempt is in flight,
//! so a stale extraction can never resolve into a replaced slot.

use std::sync::Arc;

use namecard_core::types::{Contact, TurnId};
use namecard_core::{ContactGateway, NamecardError};
use tracing::{debug, info, warn};

use crate::log::MessageLog;
use crate::persist;
use crate::turn::{BotState, ImageRef, PersistState, TurnBody, TurnKind};

/// Note attached to every successful extraction.
const EXTRACT_NOTE: &str = "I found the following contact information:";

/// Fixed failure message for image extractions.
const EXTRACT_FAILED_IMAGE: &str =
    "Sorry, I couldn't extract the contact information. Please try again with a clearer image.";

/// Fixed failure message for text extractions.
const EXTRACT_FAILED_TEXT: &str =
    "Sorry, I couldn't extract the contact information. Please try again.";

/// Failure message left on the turn when the session expired mid-attempt.
const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// A captured card photo on its way to the extraction backend.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// The scan-to-contact pipeline for one client session.
pub struct ScanPipeline {
    log: MessageLog,
    gateway: Arc<dyn ContactGateway>,
    is_processing: bool,
    pending_retake: Option<TurnId>,
}

impl ScanPipeline {
    pub fn new(gateway: Arc<dyn ContactGateway>) -> Self {
        Self {
            log: MessageLog::new(),
            gateway,
            is_processing: false,
            pending_retake: None,
        }
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// True while an extraction attempt is outstanding. Front ends disable
    /// their send affordance on this.
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// The turn a subsequent retake submission will replace, if any.
    pub fn pending_retake(&self) -> Option<&TurnId> {
        self.pending_retake.as_ref()
    }

    /// Submit a captured card photo for extraction.
    ///
    /// With `is_retake` and a recorded target, the target's user+bot pair
    /// is removed before the new pair is appended, so no orphaned turns
    /// survive a retake. Fresh captures auto-save on success; retakes wait
    /// for explicit confirmation.
    ///
    /// Returns the extracted contact, `Ok(None)` when extraction failed and
    /// the failure was recorded in the log, or `Err(Unauthorized)` when the
    /// session expired.
    pub async fn submit_image(
        &mut self,
        image: CapturedImage,
        is_retake: bool,
    ) -> Result<Option<Contact>, NamecardError> {
        if is_retake {
            if let Some(target) = self.pending_retake.take() {
                self.discard_attempt(&target);
            }
        }

        self.log.append(TurnBody::User {
            text: None,
            image: Some(ImageRef(image.filename.clone())),
        });
        let bot_id = self.log.append(TurnBody::Bot(BotState::Pending));
        self.is_processing = true;

        debug!(filename = %image.filename, is_retake, "image submitted for extraction");
        let result = self
            .gateway
            .extract_from_image(image.bytes, &image.filename)
            .await;
        self.resolve(result, &bot_id, is_retake, EXTRACT_FAILED_IMAGE)
            .await
    }

    /// Submit typed card details for extraction. Always a fresh submission;
    /// always auto-saves on success.
    pub async fn submit_text(&mut self, text: &str) -> Result<Option<Contact>, NamecardError> {
        self.log.append(TurnBody::User {
            text: Some(text.to_string()),
            image: None,
        });
        let bot_id = self.log.append(TurnBody::Bot(BotState::Pending));
        self.is_processing = true;

        debug!(chars = text.len(), "text submitted for extraction");
        let result = self.gateway.extract_from_text(text).await;
        self.resolve(result, &bot_id, false, EXTRACT_FAILED_TEXT).await
    }

    /// Record `turn_id` as the retake target. Does not mutate the log.
    ///
    /// Refused while an attempt is in flight (the stale-response guard) and
    /// for turns that are not resolved extractions.
    pub fn begin_retake(&mut self, turn_id: &TurnId) -> bool {
        if self.is_processing {
            debug!(turn_id = %turn_id, "retake refused while processing");
            return false;
        }
        match self.log.get(turn_id) {
            Some(turn) if turn.contact().is_some() => {
                self.pending_retake = Some(turn_id.clone());
                true
            }
            _ => false,
        }
    }

    /// Replace the contact shown on a resolved turn with an edited version.
    ///
    /// The turn leaves `Saved` and waits for explicit confirmation; no
    /// backend call is made here.
    pub fn edit_contact(&mut self, turn_id: &TurnId, edited: Contact) -> bool {
        let mut applied = false;
        self.log.patch(turn_id, |turn| {
            if let TurnBody::Bot(BotState::Resolved {
                contact,
                persistence,
                ..
            }) = &mut turn.body
            {
                *contact = edited;
                *persistence = PersistState::AwaitingConfirmation;
                applied = true;
            }
        });
        applied
    }

    /// Delete a turn outright. Clears a matching outstanding retake target.
    pub fn delete_turn(&mut self, turn_id: &TurnId) -> bool {
        if self.pending_retake.as_ref() == Some(turn_id) {
            self.pending_retake = None;
        }
        self.log.remove(turn_id)
    }

    /// Explicitly save the contact attached to a resolved turn (first write).
    pub async fn confirm_save(&mut self, turn_id: &TurnId) -> Result<bool, NamecardError> {
        let Some(contact) = self.log.get(turn_id).and_then(|t| t.contact()).cloned() else {
            return Ok(false);
        };
        persist::save(&mut self.log, self.gateway.as_ref(), &contact, turn_id).await
    }

    /// Explicitly push an edited contact to its existing backend record.
    pub async fn confirm_update(&mut self, turn_id: &TurnId) -> Result<bool, NamecardError> {
        let Some(contact) = self.log.get(turn_id).and_then(|t| t.contact()).cloned() else {
            return Ok(false);
        };
        persist::update(&mut self.log, self.gateway.as_ref(), &contact, turn_id).await
    }

    /// Clear the conversation back to a fresh greeting.
    pub fn clear(&mut self) {
        self.log.reset();
        self.pending_retake = None;
    }

    /// Remove a replaced attempt: the resolved bot turn and, when it
    /// directly follows one, its user turn.
    fn discard_attempt(&mut self, target: &TurnId) {
        let user_turn = self
            .log
            .predecessor(target)
            .filter(|prev| {
                self.log
                    .get(prev)
                    .is_some_and(|t| t.kind() == TurnKind::User)
            })
            .cloned();
        self.log.remove(target);
        if let Some(user_id) = user_turn {
            self.log.remove(&user_id);
        }
        debug!(turn_id = %target, "previous attempt discarded for retake");
    }

    /// Patch the pending bot turn with the extraction result and run the
    /// post-resolution step (auto-save or confirmation hand-off).
    async fn resolve(
        &mut self,
        result: Result<namecard_core::types::ExtractOutcome, NamecardError>,
        bot_id: &TurnId,
        is_retake: bool,
        failure_message: &str,
    ) -> Result<Option<Contact>, NamecardError> {
        match result {
            Ok(outcome) => {
                let contact = outcome.contact.clone();
                let persistence = if is_retake {
                    PersistState::AwaitingConfirmation
                } else {
                    PersistState::Unsaved
                };
                self.log.patch(bot_id, |turn| {
                    turn.body = TurnBody::Bot(BotState::Resolved {
                        note: EXTRACT_NOTE.to_string(),
                        contact: outcome.contact,
                        persistence,
                    });
                });
                self.is_processing = false;
                info!(contact_id = %contact.id, is_retake, "extraction resolved");

                if !is_retake {
                    if outcome.auto_saved {
                        persist::mark_saved(&mut self.log, bot_id, &contact);
                    } else {
                        persist::save(&mut self.log, self.gateway.as_ref(), &contact, bot_id)
                            .await?;
                    }
                }
                Ok(Some(contact))
            }
            Err(NamecardError::Unauthorized) => {
                self.log.patch(bot_id, |turn| {
                    turn.body = TurnBody::Bot(BotState::Failed {
                        message: SESSION_EXPIRED.to_string(),
                    });
                });
                self.is_processing = false;
                Err(NamecardError::Unauthorized)
            }
            Err(e) => {
                warn!(error = %e, "extraction failed");
                self.log.patch(bot_id, |turn| {
                    turn.body = TurnBody::Bot(BotState::Failed {
                        message: failure_message.to_string(),
                    });
                });
                self.is_processing = false;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use namecard_core::types::{ExtractOutcome, UsageSnapshot, UserProfile};

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: id.into(),
            name: name.into(),
            company: Some("Acme Corp".into()),
            title: None,
            phone: None,
            email: Some("jane@acme.test".into()),
            notes: None,
            created_at: "2026-08-01T10:00:00Z".into(),
        }
    }

    fn image() -> CapturedImage {
        CapturedImage {
            bytes: vec![0xFF, 0xD8],
            filename: "card.jpg".into(),
        }
    }

    fn gateway_err() -> NamecardError {
        NamecardError::Gateway {
            message: "backend unreachable".into(),
            source: None,
        }
    }

    /// Scripted gateway: extraction results are consumed in order, writes
    /// succeed or fail by flag, and appended contacts are captured.
    #[derive(Default)]
    struct StubGateway {
        extractions: Mutex<VecDeque<Result<ExtractOutcome, NamecardError>>>,
        fail_append: bool,
        fail_update: bool,
        appended: Mutex<Vec<Contact>>,
        updated: Mutex<Vec<Contact>>,
    }

    impl StubGateway {
        fn scripted(
            results: Vec<Result<ExtractOutcome, NamecardError>>,
        ) -> Self {
            Self {
                extractions: Mutex::new(results.into()),
                ..Default::default()
            }
        }

        fn extracting(contact: Contact) -> Self {
            Self::scripted(vec![Ok(ExtractOutcome {
                contact,
                auto_saved: false,
            })])
        }

        fn next_extraction(&self) -> Result<ExtractOutcome, NamecardError> {
            self.extractions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(gateway_err()))
        }
    }

    #[async_trait]
    impl ContactGateway for StubGateway {
        async fn extract_from_image(
            &self,
            _image: Vec<u8>,
            _filename: &str,
        ) -> Result<ExtractOutcome, NamecardError> {
            self.next_extraction()
        }

        async fn extract_from_text(
            &self,
            _text: &str,
        ) -> Result<ExtractOutcome, NamecardError> {
            self.next_extraction()
        }

        async fn append_contact(&self, contact: &Contact) -> Result<(), NamecardError> {
            if self.fail_append {
                return Err(gateway_err());
            }
            self.appended.lock().unwrap().push(contact.clone());
            Ok(())
        }

        async fn update_contact(
            &self,
            _id: &str,
            contact: &Contact,
        ) -> Result<Contact, NamecardError> {
            if self.fail_update {
                return Err(gateway_err());
            }
            self.updated.lock().unwrap().push(contact.clone());
            Ok(contact.clone())
        }

        async fn delete_contact(&self, _id: &str) -> Result<(), NamecardError> {
            Ok(())
        }

        async fn list_contacts(
            &self,
            _limit: Option<u32>,
            _offset: Option<u32>,
        ) -> Result<Vec<Contact>, NamecardError> {
            Ok(vec![])
        }

        async fn current_user(&self) -> Result<UserProfile, NamecardError> {
            Err(NamecardError::Unauthorized)
        }

        async fn scan_usage(&self) -> Result<UsageSnapshot, NamecardError> {
            Err(gateway_err())
        }

        async fn logout(&self) -> Result<(), NamecardError> {
            Ok(())
        }
    }

    fn pipeline(gateway: StubGateway) -> (ScanPipeline, Arc<StubGateway>) {
        let gateway = Arc::new(gateway);
        (ScanPipeline::new(gateway.clone()), gateway)
    }

    fn kinds(p: &ScanPipeline) -> Vec<TurnKind> {
        p.log().turns().map(|t| t.kind()).collect()
    }

    fn resolved_bot_id(p: &ScanPipeline) -> TurnId {
        p.log()
            .turns()
            .find(|t| t.contact().is_some())
            .map(|t| t.id.clone())
            .expect("a resolved bot turn should exist")
    }

    #[tokio::test]
    async fn fresh_image_scan_auto_saves_and_announces() {
        let (mut p, gateway) = pipeline(StubGateway::extracting(contact("c-1", "Jane Smith")));

        let extracted = p.submit_image(image(), false).await.unwrap().unwrap();
        assert_eq!(extracted.name, "Jane Smith");
        assert!(!p.is_processing());

        // greeting, user, bot, system success: exactly one system turn appended.
        assert_eq!(
            kinds(&p),
            vec![TurnKind::System, TurnKind::User, TurnKind::Bot, TurnKind::System]
        );
        let bot = p.log().get(&resolved_bot_id(&p)).unwrap();
        assert!(bot.is_saved());
        assert!(!bot.needs_confirmation());
        assert_eq!(gateway.appended.lock().unwrap().len(), 1);

        let system_text = p.log().turns().last().unwrap().text().unwrap().to_string();
        assert!(system_text.contains("Jane Smith"), "got: {system_text}");
    }

    #[tokio::test]
    async fn backend_auto_saved_extraction_skips_second_write() {
        let (mut p, gateway) = pipeline(StubGateway::scripted(vec![Ok(ExtractOutcome {
            contact: contact("c-1", "Jane Smith"),
            auto_saved: true,
        })]));

        p.submit_text("Jane Smith, Acme Corp").await.unwrap();

        let bot = p.log().get(&resolved_bot_id(&p)).unwrap();
        assert!(bot.is_saved());
        // The backend already wrote it; no client-side append happened.
        assert!(gateway.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn text_extraction_failure_leaves_actionable_log() {
        let (mut p, _) = pipeline(StubGateway::scripted(vec![Err(gateway_err())]));

        let outcome = p
            .submit_text("John Doe, Acme Corp, john@acme.com")
            .await
            .unwrap();
        assert!(outcome.is_none());
        assert!(!p.is_processing());

        // greeting, user turn carrying the text, failed bot turn. No system turn.
        assert_eq!(kinds(&p), vec![TurnKind::System, TurnKind::User, TurnKind::Bot]);
        let user = p.log().turns().nth(1).unwrap();
        assert_eq!(user.text(), Some("John Doe, Acme Corp, john@acme.com"));

        let bot = p.log().turns().nth(2).unwrap();
        assert!(!bot.is_pending());
        assert!(bot.contact().is_none());
        assert_eq!(bot.text(), Some(EXTRACT_FAILED_TEXT));
    }

    #[tokio::test]
    async fn save_failure_leaves_needs_confirmation_and_failure_turn() {
        let mut gateway = StubGateway::extracting(contact("c-1", "Jane Smith"));
        gateway.fail_append = true;
        let (mut p, _) = pipeline(gateway);

        let extracted = p.submit_image(image(), false).await.unwrap();
        assert!(extracted.is_some());

        let bot = p.log().get(&resolved_bot_id(&p)).unwrap();
        assert!(!bot.is_saved());
        assert!(bot.needs_confirmation());

        let last = p.log().turns().last().unwrap();
        assert_eq!(last.kind(), TurnKind::System);
        assert!(last.text().unwrap().contains("Failed to save"));
    }

    #[tokio::test]
    async fn retake_replaces_prior_pair_on_success() {
        let (mut p, _) = pipeline(StubGateway::scripted(vec![
            Ok(ExtractOutcome {
                contact: contact("c-1", "First Read"),
                auto_saved: false,
            }),
            Ok(ExtractOutcome {
                contact: contact("c-2", "Second Read"),
                auto_saved: false,
            }),
        ]));

        p.submit_image(image(), false).await.unwrap();
        let first_bot = resolved_bot_id(&p);
        let len_before = p.log().len();

        assert!(p.begin_retake(&first_bot));
        p.submit_image(image(), true).await.unwrap();

        // The old pair is gone, exactly one new user+bot pair is present.
        assert!(!p.log().contains(&first_bot));
        assert_eq!(p.log().len(), len_before);
        assert!(p.pending_retake().is_none());

        // A retake waits for explicit confirmation instead of auto-saving.
        let bot = p.log().get(&resolved_bot_id(&p)).unwrap();
        assert_eq!(bot.contact().unwrap().name, "Second Read");
        assert!(bot.needs_confirmation());
        assert!(!bot.is_saved());
    }

    #[tokio::test]
    async fn retake_replaces_prior_pair_even_on_failure() {
        let (mut p, _) = pipeline(StubGateway::scripted(vec![
            Ok(ExtractOutcome {
                contact: contact("c-1", "First Read"),
                auto_saved: false,
            }),
            Err(gateway_err()),
        ]));

        p.submit_image(image(), false).await.unwrap();
        let first_bot = resolved_bot_id(&p);

        assert!(p.begin_retake(&first_bot));
        let outcome = p.submit_image(image(), true).await.unwrap();
        assert!(outcome.is_none());

        assert!(!p.log().contains(&first_bot));
        // greeting, save-success system turn from the first attempt,
        // then the fresh user+bot pair.
        let user_and_bot: Vec<_> = p
            .log()
            .turns()
            .filter(|t| matches!(t.kind(), TurnKind::User | TurnKind::Bot))
            .collect();
        assert_eq!(user_and_bot.len(), 2);
        assert!(user_and_bot[1].contact().is_none());
    }

    #[tokio::test]
    async fn begin_retake_rejects_unresolved_targets() {
        let (mut p, _) = pipeline(StubGateway::scripted(vec![Err(gateway_err())]));
        p.submit_text("nope").await.unwrap();

        // The failed bot turn has no contact to retake.
        let failed_bot = p.log().turns().last().unwrap().id.clone();
        assert!(!p.begin_retake(&failed_bot));

        let missing = TurnId("missing".into());
        assert!(!p.begin_retake(&missing));
    }

    #[tokio::test]
    async fn edit_then_confirm_update_roundtrips_to_saved() {
        let (mut p, gateway) = pipeline(StubGateway::extracting(contact("c-1", "Jane Smith")));
        p.submit_image(image(), false).await.unwrap();
        let bot_id = resolved_bot_id(&p);

        let mut edited = contact("c-1", "Jane Q. Smith");
        edited.notes = Some("met at the conference".into());
        assert!(p.edit_contact(&bot_id, edited.clone()));

        // An edit after save clears Saved and demands confirmation.
        let turn = p.log().get(&bot_id).unwrap();
        assert!(turn.needs_confirmation());
        assert!(!turn.is_saved());

        assert!(p.confirm_update(&bot_id).await.unwrap());
        let turn = p.log().get(&bot_id).unwrap();
        assert_eq!(turn.contact(), Some(&edited));
        assert!(turn.is_saved());
        assert!(!turn.needs_confirmation());
        assert_eq!(gateway.updated.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_update_keeps_confirmation_pending() {
        let mut gateway = StubGateway::extracting(contact("c-1", "Jane Smith"));
        gateway.fail_update = true;
        let (mut p, _) = pipeline(gateway);
        p.submit_image(image(), false).await.unwrap();
        let bot_id = resolved_bot_id(&p);

        p.edit_contact(&bot_id, contact("c-1", "Jane Q. Smith"));
        assert!(!p.confirm_update(&bot_id).await.unwrap());

        let turn = p.log().get(&bot_id).unwrap();
        assert!(turn.needs_confirmation());
        let last = p.log().turns().last().unwrap();
        assert!(last.text().unwrap().contains("Failed to update"));
    }

    #[tokio::test]
    async fn delete_turn_clears_matching_retake_target() {
        let (mut p, _) = pipeline(StubGateway::extracting(contact("c-1", "Jane Smith")));
        p.submit_image(image(), false).await.unwrap();
        let bot_id = resolved_bot_id(&p);

        assert!(p.begin_retake(&bot_id));
        assert!(p.delete_turn(&bot_id));
        assert!(p.pending_retake().is_none());
        assert!(!p.log().contains(&bot_id));
    }

    #[tokio::test]
    async fn unauthorized_extraction_surfaces_distinctly() {
        let (mut p, _) = pipeline(StubGateway::scripted(vec![Err(
            NamecardError::Unauthorized,
        )]));

        let err = p.submit_text("whoever").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!p.is_processing());
        // The attempt still resolved in the log.
        let bot = p.log().turns().last().unwrap();
        assert!(!bot.is_pending());
        assert!(bot.text().unwrap().contains("session has expired"));
    }

    #[tokio::test]
    async fn clear_resets_log_and_retake_target() {
        let (mut p, _) = pipeline(StubGateway::extracting(contact("c-1", "Jane Smith")));
        p.submit_image(image(), false).await.unwrap();
        let bot_id = resolved_bot_id(&p);
        p.begin_retake(&bot_id);

        p.clear();
        assert_eq!(p.log().len(), 1);
        assert!(p.pending_retake().is_none());
    }

    #[tokio::test]
    async fn extraction_with_empty_name_waits_for_confirmation() {
        let (mut p, gateway) = pipeline(StubGateway::extracting(contact("c-1", "")));
        let extracted = p.submit_image(image(), false).await.unwrap();
        assert!(extracted.is_some());

        // Auto-save refuses the nameless contact and leaves it editable.
        let bot = p.log().get(&resolved_bot_id(&p)).unwrap();
        assert!(bot.needs_confirmation());
        assert!(gateway.appended.lock().unwrap().is_empty());
    }
}
