// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `namecard contacts` command implementation.

use colored::Colorize;
use namecard_chat::ContactHistory;
use namecard_config::model::NamecardConfig;
use namecard_core::NamecardError;

use crate::app::App;
use crate::render;

/// Run the `namecard contacts` command: fetch and print saved contacts.
pub async fn run_contacts(config: &NamecardConfig, limit: u32) -> Result<(), NamecardError> {
    let app = App::init(config).await?;
    let _session = app.require_session().await?;

    let mut history = ContactHistory::new();
    history.refresh(app.gateway.as_ref(), Some(limit)).await?;

    if let Some(error) = history.error() {
        eprintln!("{}", error.red());
        std::process::exit(1);
    }

    if history.contacts().is_empty() {
        println!("No saved contacts yet. Run {} to get started.", "namecard scan".bold());
        return Ok(());
    }

    for contact in history.contacts() {
        render::print_contact_line(contact);
    }
    println!("\n{} contacts", history.contacts().len());
    Ok(())
}
