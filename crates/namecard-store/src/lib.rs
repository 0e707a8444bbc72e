// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local SQLite state store for the Namecard client.
//!
//! Holds the state that must survive process restarts: the cached
//! authenticated identity, the usage-counter cache, and the user's digital
//! card. Each table holds a single row that is replaced wholesale on update
//! so cached state never diverges field-by-field from its source.

pub mod database;
pub mod models;
pub mod queries;

pub use database::StateDb;
pub use models::CachedUsage;
