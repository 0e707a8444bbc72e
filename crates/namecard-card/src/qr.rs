// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! QR rendering of the card's share URL for terminal display.

use namecard_core::NamecardError;
use qrcode::render::unicode;
use qrcode::QrCode;

/// Render data (typically the share URL) as a terminal-printable QR code
/// using half-height unicode blocks.
pub fn render_qr(data: &str) -> Result<String, NamecardError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| NamecardError::Internal(format!("QR encoding failed: {e}")))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build())
}
