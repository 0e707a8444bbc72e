// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The scan-to-contact pipeline.
//!
//! [`MessageLog`] keeps the ordered conversation, [`ScanPipeline`] drives
//! capture → extraction → resolution and the retake protocol, the
//! persistence coordinator in [`persist`] reconciles save/update outcomes
//! onto the log, and [`ContactHistory`] caches previously saved contacts.

pub mod history;
pub mod log;
pub mod persist;
pub mod pipeline;
pub mod turn;

pub use history::ContactHistory;
pub use log::MessageLog;
pub use pipeline::{CapturedImage, ScanPipeline};
pub use turn::{BotState, ChatTurn, ImageRef, PersistState, TurnBody, TurnKind};
