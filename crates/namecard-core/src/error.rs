// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Namecard client.

use thiserror::Error;

/// The primary error type used across the Namecard client crates.
#[derive(Debug, Error)]
pub enum NamecardError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend rejected the session (HTTP 401). Surfaced distinctly so the
    /// application layer can send the user back through login.
    #[error("not signed in or session expired")]
    Unauthorized,

    /// Backend gateway errors (transport failure, non-2xx response, bad payload).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Local state store errors (database open, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A free-tier quota would be exceeded by the requested action.
    #[error("free-tier limit reached: {used}/{limit} {kind}")]
    QuotaExceeded { kind: String, used: u32, limit: u32 },

    /// A contact failed client-side validation (e.g. empty name at save time).
    #[error("invalid contact: {0}")]
    InvalidContact(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NamecardError {
    /// True when this error is the distinct session-expiry signal.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NamecardError::Unauthorized)
    }
}
