// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering of conversation turns and contacts.

use colored::Colorize;
use namecard_chat::{BotState, ChatTurn, MessageLog, PersistState, TurnBody};
use namecard_core::types::Contact;

/// Print every turn after `skip` in conversation order.
pub fn print_new_turns(log: &MessageLog, skip: usize) {
    for turn in log.turns().skip(skip) {
        print_turn(turn);
    }
}

/// Print one conversation turn.
pub fn print_turn(turn: &ChatTurn) {
    match &turn.body {
        TurnBody::User { text, image } => {
            let content = match (text, image) {
                (Some(text), _) => text.clone(),
                (None, Some(image)) => format!("[photo: {}]", image.0),
                (None, None) => String::new(),
            };
            println!("{} {content}", "you>".cyan().bold());
        }
        TurnBody::System { text } => {
            println!("{} {text}", "*".yellow());
        }
        TurnBody::Bot(BotState::Pending) => {
            println!("{} extracting...", "bot>".green().bold());
        }
        TurnBody::Bot(BotState::Failed { message }) => {
            println!("{} {}", "bot>".green().bold(), message.red());
        }
        TurnBody::Bot(BotState::Resolved {
            note,
            contact,
            persistence,
        }) => {
            println!("{} {note}", "bot>".green().bold());
            print_contact(contact);
            match persistence {
                PersistState::Saved => println!("  {}", "saved".green()),
                PersistState::AwaitingConfirmation => {
                    println!("  {}", "not saved yet - confirm to save".yellow());
                }
                PersistState::Unsaved => {}
            }
        }
    }
}

/// Print one contact as an indented field list.
pub fn print_contact(contact: &Contact) {
    println!("  {}", contact.name.bold());
    if let Some(title) = &contact.title {
        println!("  {title}");
    }
    if let Some(company) = &contact.company {
        println!("  {company}");
    }
    if let Some(phone) = &contact.phone {
        println!("  {phone}");
    }
    if let Some(email) = &contact.email {
        println!("  {email}");
    }
    if let Some(notes) = &contact.notes {
        println!("  {}", notes.dimmed());
    }
}

/// Print one contact as a single history line.
pub fn print_contact_line(contact: &Contact) {
    let company = contact.company.as_deref().unwrap_or("-");
    let email = contact.email.as_deref().unwrap_or("-");
    println!(
        "{:<24} {:<20} {}",
        contact.name.bold(),
        company,
        email.dimmed()
    );
}
