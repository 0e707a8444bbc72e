// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `namecard card` command implementation.
//!
//! The digital card is local state: created on the first `edit`, never
//! auto-created. `vcard` and `qr` render the existing card for sharing.

use clap::{Args, Subcommand};
use colored::Colorize;
use namecard_card::{apply_edit, render_qr, share_url, to_vcard, CardEdit};
use namecard_config::model::NamecardConfig;
use namecard_core::types::DigitalCard;
use namecard_core::NamecardError;
use namecard_store::queries::card as card_store;

use crate::app::App;

/// Subcommands of `namecard card`.
#[derive(Subcommand, Debug)]
pub enum CardCommand {
    /// Show your digital card and its share link.
    Show,
    /// Create or update your digital card.
    Edit(EditArgs),
    /// Print your card as a vCard document.
    Vcard,
    /// Print a QR code of your card's share link.
    Qr,
    /// Delete your digital card.
    Delete,
}

/// Fields to set on the card; anything omitted is left unchanged.
#[derive(Args, Debug)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Include the phone number when the card is shared.
    #[arg(long, conflicts_with = "hide_phone")]
    pub show_phone: bool,
    /// Keep the phone number off the shared card.
    #[arg(long)]
    pub hide_phone: bool,
    #[arg(long)]
    pub linkedin: Option<String>,
    #[arg(long)]
    pub instagram: Option<String>,
    #[arg(long)]
    pub twitter: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub photo_url: Option<String>,
}

impl EditArgs {
    fn into_edit(self) -> CardEdit {
        let show_phone = if self.show_phone {
            Some(true)
        } else if self.hide_phone {
            Some(false)
        } else {
            None
        };
        CardEdit {
            name: self.name,
            title: self.title,
            company: self.company,
            email: self.email,
            phone: self.phone,
            show_phone,
            linked_in: self.linkedin,
            instagram: self.instagram,
            twitter: self.twitter,
            website: self.website,
            photo_url: self.photo_url,
        }
    }
}

/// Run the `namecard card` command.
pub async fn run_card(config: &NamecardConfig, action: CardCommand) -> Result<(), NamecardError> {
    let app = App::init(config).await?;

    match action {
        CardCommand::Show => {
            let card = require_card(&app).await?;
            print_card(&card, config);
        }
        CardCommand::Edit(args) => {
            let existing = card_store::load_card(&app.db).await?;
            let card = apply_edit(existing, args.into_edit());
            if card.name.trim().is_empty() {
                return Err(NamecardError::InvalidContact(
                    "your card needs a name; pass --name".into(),
                ));
            }
            card_store::save_card(&app.db, &card).await?;
            print_card(&card, config);
        }
        CardCommand::Vcard => {
            let card = require_card(&app).await?;
            print!("{}", to_vcard(&card));
        }
        CardCommand::Qr => {
            let card = require_card(&app).await?;
            let url = share_url(&card, &config.card.share_base_url);
            println!("{}", render_qr(&url)?);
            println!("{url}");
        }
        CardCommand::Delete => {
            card_store::clear_card(&app.db).await?;
            println!("Digital card deleted.");
        }
    }
    Ok(())
}

async fn require_card(app: &App) -> Result<DigitalCard, NamecardError> {
    card_store::load_card(&app.db).await?.ok_or_else(|| {
        NamecardError::Internal(
            "you have no digital card yet; create one with `namecard card edit --name ...`".into(),
        )
    })
}

fn print_card(card: &DigitalCard, config: &NamecardConfig) {
    println!("{}", card.name.bold());
    if let Some(title) = &card.title {
        println!("{title}");
    }
    if let Some(company) = &card.company {
        println!("{company}");
    }
    match (&card.phone, card.show_phone) {
        (Some(phone), true) => println!("{phone}"),
        (Some(_), false) => println!("{}", "phone hidden on shared card".dimmed()),
        (None, _) => {}
    }
    if let Some(email) = &card.email {
        println!("{email}");
    }
    for link in [&card.website, &card.linked_in, &card.instagram, &card.twitter]
        .into_iter()
        .flatten()
    {
        println!("{link}");
    }
    println!(
        "\nshare: {}",
        share_url(card, &config.card.share_base_url).bold()
    );
}
