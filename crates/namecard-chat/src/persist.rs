// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence coordinator: writes contacts to the backend store and
//! reconciles the corresponding log turn.
//!
//! `Saved` is only ever set on a confirmed 2xx backend response. A failed
//! write leaves the turn `AwaitingConfirmation` and announces the failure
//! in a system turn, so the contact stays actionable instead of silently
//! lost.

use namecard_core::types::{Contact, TurnId};
use namecard_core::{ContactGateway, NamecardError};
use tracing::{info, warn};

use crate::log::MessageLog;
use crate::turn::{BotState, PersistState, TurnBody};

pub(crate) fn saved_text(name: &str) -> String {
    format!("{name} has been saved to your contact sheet.")
}

pub(crate) fn updated_text(name: &str) -> String {
    format!("{name} has been updated in your contact sheet.")
}

const SAVE_FAILED: &str = "Failed to save the contact. You can try saving it again.";
const UPDATE_FAILED: &str = "Failed to update the contact. You can try saving it again.";
const NAME_MISSING: &str = "The contact has no name. Edit it and save again.";

/// Set the persistence state of a resolved bot turn; other turns are untouched.
fn set_persistence(log: &mut MessageLog, turn_id: &TurnId, state: PersistState) {
    log.patch(turn_id, |turn| {
        if let TurnBody::Bot(BotState::Resolved { persistence, .. }) = &mut turn.body {
            *persistence = state;
        }
    });
}

/// Replace the contact attached to a resolved bot turn with its canonical form.
fn set_contact(log: &mut MessageLog, turn_id: &TurnId, canonical: Contact) {
    log.patch(turn_id, |turn| {
        if let TurnBody::Bot(BotState::Resolved { contact, .. }) = &mut turn.body {
            *contact = canonical;
        }
    });
}

/// Announce an already-persisted contact without issuing a second write.
///
/// Used when the extraction response reports the backend auto-saved the
/// contact as part of the extraction call.
pub(crate) fn mark_saved(log: &mut MessageLog, turn_id: &TurnId, contact: &Contact) {
    set_persistence(log, turn_id, PersistState::Saved);
    log.append(TurnBody::System {
        text: saved_text(&contact.name),
    });
    info!(contact_id = %contact.id, "contact persisted by backend during extraction");
}

/// POST the contact to the backend store and reconcile the turn.
///
/// Returns whether the contact is now durably saved. `Unauthorized`
/// propagates so the application layer can redirect to login; every other
/// failure degrades to an actionable `AwaitingConfirmation` state.
pub async fn save(
    log: &mut MessageLog,
    gateway: &dyn ContactGateway,
    contact: &Contact,
    turn_id: &TurnId,
) -> Result<bool, NamecardError> {
    if contact.validate_for_save().is_err() {
        log.append(TurnBody::System {
            text: NAME_MISSING.to_string(),
        });
        set_persistence(log, turn_id, PersistState::AwaitingConfirmation);
        return Ok(false);
    }

    match gateway.append_contact(contact).await {
        Ok(()) => {
            set_persistence(log, turn_id, PersistState::Saved);
            log.append(TurnBody::System {
                text: saved_text(&contact.name),
            });
            info!(contact_id = %contact.id, "contact saved");
            Ok(true)
        }
        Err(NamecardError::Unauthorized) => Err(NamecardError::Unauthorized),
        Err(e) => {
            warn!(contact_id = %contact.id, error = %e, "contact save failed");
            log.append(TurnBody::System {
                text: SAVE_FAILED.to_string(),
            });
            set_persistence(log, turn_id, PersistState::AwaitingConfirmation);
            Ok(false)
        }
    }
}

/// PUT an edited contact to its existing backend record and reconcile the
/// turn with the now-canonical contact the backend returns.
pub async fn update(
    log: &mut MessageLog,
    gateway: &dyn ContactGateway,
    contact: &Contact,
    turn_id: &TurnId,
) -> Result<bool, NamecardError> {
    if contact.validate_for_save().is_err() {
        log.append(TurnBody::System {
            text: NAME_MISSING.to_string(),
        });
        set_persistence(log, turn_id, PersistState::AwaitingConfirmation);
        return Ok(false);
    }

    match gateway.update_contact(&contact.id, contact).await {
        Ok(canonical) => {
            let name = canonical.name.clone();
            set_contact(log, turn_id, canonical);
            set_persistence(log, turn_id, PersistState::Saved);
            log.append(TurnBody::System {
                text: updated_text(&name),
            });
            info!(contact_id = %contact.id, "contact updated");
            Ok(true)
        }
        Err(NamecardError::Unauthorized) => Err(NamecardError::Unauthorized),
        Err(e) => {
            warn!(contact_id = %contact.id, error = %e, "contact update failed");
            log.append(TurnBody::System {
                text: UPDATE_FAILED.to_string(),
            });
            set_persistence(log, turn_id, PersistState::AwaitingConfirmation);
            Ok(false)
        }
    }
}
