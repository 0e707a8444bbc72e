// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Digital card editing, vCard serialization, and QR share rendering.

pub mod card;
pub mod qr;
pub mod vcard;

pub use card::{apply_edit, share_url, CardEdit};
pub use qr::render_qr;
pub use vcard::to_vcard;
