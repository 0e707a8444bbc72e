// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway to the Namecard contact backend.
//!
//! [`HttpGateway`] implements [`namecard_core::ContactGateway`] over
//! reqwest with a cookie-based session; [`AuthSession`] layers the locally
//! cached identity and offline-tolerant auth check on top.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::AuthSession;
pub use client::HttpGateway;
