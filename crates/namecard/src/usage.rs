// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `namecard usage` command implementation.

use colored::Colorize;
use namecard_config::model::NamecardConfig;
use namecard_core::NamecardError;
use namecard_usage::UsageTracker;

use crate::app::App;

/// Run the `namecard usage` command: refresh and print quota counters.
pub async fn run_usage(config: &NamecardConfig) -> Result<(), NamecardError> {
    let app = App::init(config).await?;
    let _session = app.require_session().await?;

    let mut tracker = UsageTracker::restore(&config.limits, &app.db).await?;
    let fetched = tracker.fetch(app.gateway.as_ref(), &app.db).await;
    if !fetched {
        println!(
            "{}",
            "backend unreachable - showing cached counters".yellow()
        );
    }

    if tracker.is_premium() {
        println!("{}", "premium account - unlimited scans and contacts".green());
    }

    print_line(
        "scans",
        tracker.scans_used(),
        config.limits.free_scan_limit,
        tracker.remaining_scans(),
    );
    print_line(
        "contacts",
        tracker.contacts_saved(),
        config.limits.free_contact_limit,
        tracker.remaining_contacts(),
    );

    match tracker.last_fetched() {
        Some(at) => println!("last confirmed by backend: {at}"),
        None => println!("counters not yet confirmed by backend"),
    }
    Ok(())
}

fn print_line(label: &str, used: u32, limit: u32, remaining: Option<u32>) {
    match remaining {
        Some(remaining) => println!("{label}: {used}/{limit} used, {remaining} remaining"),
        None => println!("{label}: {used} used (unlimited)"),
    }
}
