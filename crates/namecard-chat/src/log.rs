// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered conversation log with point mutation and removal by id.
//!
//! Turns live in an id-keyed map for O(1) patch/remove, with a separate
//! insertion-order list preserving display order. No reordering ever
//! occurs; mutation happens only through `patch`/`remove` by id.

use std::collections::HashMap;

use namecard_core::types::TurnId;
use tracing::debug;

use crate::turn::{ChatTurn, TurnBody};

/// Greeting shown when a conversation starts.
pub const GREETING: &str =
    "Welcome to Namecard! Take a photo of a business card to get started.";

/// Greeting shown after the user clears the conversation.
pub const CLEARED_GREETING: &str =
    "Chat cleared. Take a photo of a business card to continue.";

/// The ordered sequence of conversation turns.
pub struct MessageLog {
    order: Vec<TurnId>,
    turns: HashMap<TurnId, ChatTurn>,
}

impl MessageLog {
    /// A new log holding the initial system greeting.
    pub fn new() -> Self {
        let mut log = Self {
            order: Vec::new(),
            turns: HashMap::new(),
        };
        log.append(TurnBody::System {
            text: GREETING.to_string(),
        });
        log
    }

    /// Append a turn at the end, assigning a fresh id and timestamp.
    pub fn append(&mut self, body: TurnBody) -> TurnId {
        let id = TurnId(uuid::Uuid::new_v4().to_string());
        let turn = ChatTurn {
            id: id.clone(),
            body,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.order.push(id.clone());
        self.turns.insert(id.clone(), turn);
        id
    }

    /// Mutate the turn with the given id in place.
    ///
    /// Unknown ids are a no-op returning `false`; they never raise into the
    /// caller's flow.
    pub fn patch(&mut self, id: &TurnId, f: impl FnOnce(&mut ChatTurn)) -> bool {
        match self.turns.get_mut(id) {
            Some(turn) => {
                f(turn);
                true
            }
            None => {
                debug!(turn_id = %id, "patch on absent turn ignored");
                false
            }
        }
    }

    /// Delete the turn with the given id outright.
    pub fn remove(&mut self, id: &TurnId) -> bool {
        if self.turns.remove(id).is_none() {
            debug!(turn_id = %id, "remove on absent turn ignored");
            return false;
        }
        self.order.retain(|o| o != id);
        true
    }

    /// Replace the entire log with a single fresh system greeting.
    pub fn reset(&mut self) {
        self.order.clear();
        self.turns.clear();
        self.append(TurnBody::System {
            text: CLEARED_GREETING.to_string(),
        });
    }

    pub fn get(&self, id: &TurnId) -> Option<&ChatTurn> {
        self.turns.get(id)
    }

    pub fn contains(&self, id: &TurnId) -> bool {
        self.turns.contains_key(id)
    }

    /// Turns in insertion order.
    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.order.iter().filter_map(|id| self.turns.get(id))
    }

    /// The id of the turn immediately before `id` in display order.
    pub(crate) fn predecessor(&self, id: &TurnId) -> Option<&TurnId> {
        let idx = self.order.iter().position(|o| o == id)?;
        idx.checked_sub(1).map(|prev| &self.order[prev])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
