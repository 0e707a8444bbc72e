// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namecard - scan business cards into your contact sheet.
//!
//! This is the binary entry point for the Namecard CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use namecard_core::NamecardError;

mod app;
mod card;
mod contacts;
mod render;
mod scan;
mod session;
mod shell;
mod usage;

/// Namecard - scan business cards into your contact sheet.
#[derive(Parser, Debug)]
#[command(name = "namecard", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a business card photo and save the extracted contact.
    Scan {
        /// Path to the card photo.
        image: PathBuf,
    },
    /// Extract a contact from typed card details and save it.
    Add {
        /// Free-form card text, e.g. "Jane Smith, Acme Corp, jane@acme.com".
        text: String,
    },
    /// Launch an interactive scanning session.
    Shell,
    /// List previously saved contacts.
    Contacts {
        /// Maximum number of contacts to fetch.
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Show scan/save usage against the free-tier limits.
    Usage,
    /// Show the signed-in account.
    Whoami,
    /// Sign out and clear the cached session.
    Logout,
    /// Manage your shareable digital card.
    Card {
        #[command(subcommand)]
        action: card::CardCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match namecard_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            namecard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    app::init_tracing(&config);

    let result = match cli.command {
        Some(Commands::Scan { image }) => scan::run_scan(&config, &image).await,
        Some(Commands::Add { text }) => scan::run_add(&config, &text).await,
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Contacts { limit }) => contacts::run_contacts(&config, limit).await,
        Some(Commands::Usage) => usage::run_usage(&config).await,
        Some(Commands::Whoami) => session::run_whoami(&config).await,
        Some(Commands::Logout) => session::run_logout(&config).await,
        Some(Commands::Card { action }) => card::run_card(&config, action).await,
        None => {
            println!("namecard: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        match &e {
            NamecardError::Unauthorized => {
                eprintln!(
                    "{} {}",
                    "not signed in.".red(),
                    format!(
                        "Open {} in your browser to sign in.",
                        namecard_api::AuthSession::login_url(&config.api.base_url)
                    )
                );
            }
            NamecardError::QuotaExceeded { .. } => {
                eprintln!("{e}");
                eprintln!("Upgrade to premium for unlimited scans and contacts.");
            }
            _ => eprintln!("{} {e}", "error:".red()),
        }
        std::process::exit(1);
    }
}
