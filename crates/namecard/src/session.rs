// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `namecard whoami` and `namecard logout` command implementations.

use colored::Colorize;
use namecard_api::AuthSession;
use namecard_config::model::NamecardConfig;
use namecard_core::NamecardError;

use crate::app::App;

/// Run the `namecard whoami` command.
pub async fn run_whoami(config: &NamecardConfig) -> Result<(), NamecardError> {
    let app = App::init(config).await?;
    let mut session = AuthSession::restore(&app.db).await?;
    let signed_in = session.check(app.gateway.as_ref(), &app.db).await?;

    if !signed_in {
        println!(
            "Not signed in. Open {} in your browser to sign in.",
            AuthSession::login_url(&config.api.base_url).bold()
        );
        return Ok(());
    }

    if session.connection_error() {
        println!(
            "{}",
            "backend unreachable - showing the cached session".yellow()
        );
    }

    // `check` only returns true with a profile present.
    if let Some(profile) = session.profile() {
        println!("{} <{}>", profile.name.bold(), profile.email);
        if let Some(sheet_url) = &profile.sheet_url {
            println!("contact sheet: {sheet_url}");
        }
    }
    Ok(())
}

/// Run the `namecard logout` command.
pub async fn run_logout(config: &NamecardConfig) -> Result<(), NamecardError> {
    let app = App::init(config).await?;
    let mut session = AuthSession::restore(&app.db).await?;
    session.logout(app.gateway.as_ref(), &app.db).await?;
    println!("Signed out.");
    Ok(())
}
