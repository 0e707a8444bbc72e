// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! vCard 3.0 serialization of the digital card.
//!
//! Lines are CRLF-terminated and property values escape backslash,
//! semicolon, comma, and newline per RFC 2426. The phone number is
//! omitted entirely when the card's `show_phone` is off.

use namecard_core::types::DigitalCard;

/// Serialize a digital card as a vCard 3.0 document.
pub fn to_vcard(card: &DigitalCard) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCARD".into(),
        "VERSION:3.0".into(),
        format!("FN:{}", escape(&card.name)),
        format!("N:;{};;;", escape(&card.name)),
    ];

    if let Some(company) = &card.company {
        lines.push(format!("ORG:{}", escape(company)));
    }
    if let Some(title) = &card.title {
        lines.push(format!("TITLE:{}", escape(title)));
    }
    if card.show_phone {
        if let Some(phone) = &card.phone {
            lines.push(format!("TEL;TYPE=CELL:{}", escape(phone)));
        }
    }
    if let Some(email) = &card.email {
        lines.push(format!("EMAIL;TYPE=INTERNET:{}", escape(email)));
    }
    if let Some(website) = &card.website {
        lines.push(format!("URL:{}", escape(website)));
    }
    if let Some(linked_in) = &card.linked_in {
        lines.push(format!("X-SOCIALPROFILE;TYPE=linkedin:{}", escape(linked_in)));
    }
    if let Some(instagram) = &card.instagram {
        lines.push(format!("X-SOCIALPROFILE;TYPE=instagram:{}", escape(instagram)));
    }
    if let Some(twitter) = &card.twitter {
        lines.push(format!("X-SOCIALPROFILE;TYPE=twitter:{}", escape(twitter)));
    }
    if let Some(photo_url) = &card.photo_url {
        lines.push(format!("PHOTO;VALUE=URI:{}", escape(photo_url)));
    }
    lines.push(format!("REV:{}", escape(&card.updated_at)));
    lines.push("END:VCARD".into());

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

/// Escape a property value per RFC 2426 section 2.4.2.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
