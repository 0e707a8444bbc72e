// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-level request/response shapes specific to the HTTP gateway.
//!
//! Domain types (contact, profile, usage snapshot) deserialize directly
//! from the backend's JSON; only the envelopes unique to the HTTP surface
//! live here.

use serde::{Deserialize, Serialize};

/// Body for text-based extraction requests.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractTextRequest<'a> {
    pub text: &'a str,
}

/// Generic `{ "success": bool }` envelope used by append and delete.
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}
