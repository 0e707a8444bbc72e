// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `namecard shell` command implementation.
//!
//! Launches an interactive scanning session with readline history. The
//! conversation log lives for the duration of the session, which is what
//! makes retake, edit-confirmation, and delete addressable: they act on
//! turns of the current session.

use std::path::Path;

use colored::Colorize;
use namecard_chat::{CapturedImage, ContactHistory, ScanPipeline};
use namecard_config::model::NamecardConfig;
use namecard_core::types::TurnId;
use namecard_core::NamecardError;
use namecard_usage::UsageTracker;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::app::App;
use crate::render;

const HELP: &str = "\
Type card details to extract a contact, or use a command:
  /scan <path>     scan a card photo (auto-saves)
  /retake <path>   rescan, replacing the last extracted contact
  /confirm         save the contact that is waiting for confirmation
  /delete          delete the last extracted contact from the chat
  /contacts        list previously saved contacts
  /usage           show remaining free-tier quota
  /clear           clear the conversation
  /quit            exit";

/// Runs the `namecard shell` interactive session.
pub async fn run_shell(config: &NamecardConfig) -> Result<(), NamecardError> {
    let app = App::init(config).await?;
    let session = app.require_session().await?;
    if session.connection_error() {
        println!(
            "{}",
            "backend unreachable - working from the cached session".yellow()
        );
    }

    let mut tracker = UsageTracker::restore(&config.limits, &app.db).await?;
    tracker.fetch(app.gateway.as_ref(), &app.db).await;

    let mut pipeline = ScanPipeline::new(app.gateway.clone());
    let mut printed = 0;

    let mut rl = DefaultEditor::new()
        .map_err(|e| NamecardError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "namecard shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());
    printed = flush_turns(&pipeline, printed);

    let prompt = format!("{}> ", "namecard".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" | "/exit" => break,
                    "/help" => println!("{HELP}"),
                    "/clear" => {
                        pipeline.clear();
                        printed = 0;
                        printed = flush_turns(&pipeline, printed);
                    }
                    "/confirm" => {
                        confirm_pending(&mut pipeline, &mut tracker, &app).await?;
                        printed = flush_turns(&pipeline, printed);
                    }
                    "/delete" => {
                        match last_resolved(&pipeline) {
                            Some(id) => {
                                pipeline.delete_turn(&id);
                                println!("{}", "contact removed from the chat".yellow());
                                // Turns before the deletion point are unchanged.
                                printed = printed.min(pipeline.log().len());
                            }
                            None => println!("nothing to delete"),
                        }
                    }
                    "/contacts" => print_history(&app).await?,
                    "/usage" => print_usage(&tracker),
                    _ if trimmed.starts_with("/scan ") => {
                        let path = trimmed.trim_start_matches("/scan ").trim();
                        submit_image(&mut pipeline, &mut tracker, &app, path, false).await?;
                        printed = flush_turns(&pipeline, printed);
                    }
                    _ if trimmed.starts_with("/retake ") => {
                        let path = trimmed.trim_start_matches("/retake ").trim();
                        let Some(target) = last_resolved(&pipeline) else {
                            println!("no extracted contact to retake");
                            continue;
                        };
                        if !pipeline.begin_retake(&target) {
                            println!("that contact cannot be retaken right now");
                            continue;
                        }
                        // The replaced pair leaves the log, so re-print from scratch.
                        submit_image(&mut pipeline, &mut tracker, &app, path, true).await?;
                        printed = 0;
                        printed = flush_turns(&pipeline, printed);
                    }
                    _ if trimmed.starts_with('/') => {
                        println!("unknown command; type {} for help", "/help".yellow());
                    }
                    text => {
                        if !tracker.can_scan() {
                            println!("{}", tracker.scan_quota_error().to_string().red());
                            continue;
                        }
                        let extracted = pipeline.submit_text(text).await?;
                        record_outcome(&mut tracker, &app, &pipeline, extracted.is_some()).await;
                        printed = flush_turns(&pipeline, printed);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(NamecardError::Internal(format!("readline error: {e}")));
            }
        }
    }

    println!("bye");
    Ok(())
}

/// Print turns appended since the last flush; returns the new high-water mark.
fn flush_turns(pipeline: &ScanPipeline, printed: usize) -> usize {
    render::print_new_turns(pipeline.log(), printed);
    pipeline.log().len()
}

/// The most recent turn carrying an extracted contact.
fn last_resolved(pipeline: &ScanPipeline) -> Option<TurnId> {
    pipeline
        .log()
        .turns()
        .filter(|t| t.contact().is_some())
        .last()
        .map(|t| t.id.clone())
}

async fn submit_image(
    pipeline: &mut ScanPipeline,
    tracker: &mut UsageTracker,
    app: &App,
    path: &str,
    is_retake: bool,
) -> Result<(), NamecardError> {
    if !tracker.can_scan() {
        println!("{}", tracker.scan_quota_error().to_string().red());
        return Ok(());
    }
    let path = Path::new(path);
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("{}", format!("could not read {}: {e}", path.display()).red());
            return Ok(());
        }
    };
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "card.jpg".to_string());

    let extracted = pipeline
        .submit_image(CapturedImage { bytes, filename }, is_retake)
        .await?;
    record_outcome(tracker, app, pipeline, extracted.is_some()).await;
    Ok(())
}

/// Record optimistic quota increments for a completed capture.
async fn record_outcome(
    tracker: &mut UsageTracker,
    app: &App,
    pipeline: &ScanPipeline,
    extracted: bool,
) {
    if !extracted {
        return;
    }
    tracker.record_scan(&app.db).await;
    // The capture that just resolved is the last turn carrying a contact.
    let saved = pipeline
        .log()
        .turns()
        .filter(|t| t.contact().is_some())
        .last()
        .is_some_and(|t| t.is_saved());
    if saved {
        tracker.record_contact_saved(&app.db).await;
    }
    debug!(saved, "capture recorded against quota");
}

/// Save the contact on the turn that is waiting for confirmation.
async fn confirm_pending(
    pipeline: &mut ScanPipeline,
    tracker: &mut UsageTracker,
    app: &App,
) -> Result<(), NamecardError> {
    let pending = pipeline
        .log()
        .turns()
        .filter(|t| t.needs_confirmation())
        .last()
        .map(|t| t.id.clone());
    match pending {
        Some(id) => {
            if !tracker.can_save_contact() {
                println!("{}", "free-tier contact limit reached".red());
                return Ok(());
            }
            if pipeline.confirm_save(&id).await? {
                tracker.record_contact_saved(&app.db).await;
            }
        }
        None => println!("nothing is waiting for confirmation"),
    }
    Ok(())
}

async fn print_history(app: &App) -> Result<(), NamecardError> {
    let mut history = ContactHistory::new();
    history.refresh(app.gateway.as_ref(), Some(50)).await?;
    if let Some(error) = history.error() {
        println!("{}", error.red());
        return Ok(());
    }
    if history.contacts().is_empty() {
        println!("no saved contacts yet");
    }
    for contact in history.contacts() {
        render::print_contact_line(contact);
    }
    Ok(())
}

fn print_usage(tracker: &UsageTracker) {
    match tracker.remaining_scans() {
        Some(remaining) => println!(
            "scans: {}/{} used ({remaining} left)",
            tracker.scans_used(),
            tracker.scans_used() + remaining
        ),
        None => println!("scans: unlimited (premium)"),
    }
    match tracker.remaining_contacts() {
        Some(remaining) => println!(
            "contacts: {}/{} saved ({remaining} left)",
            tracker.contacts_saved(),
            tracker.contacts_saved() + remaining
        ),
        None => println!("contacts: unlimited (premium)"),
    }
}
