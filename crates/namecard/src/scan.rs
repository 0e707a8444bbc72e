// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `namecard scan` and `namecard add` command implementations.
//!
//! One-shot capture: verify the session, gate on the scan quota, run one
//! extraction through the pipeline, and print the resulting conversation
//! turns. Fresh captures auto-save, so a successful run ends with the
//! contact in the user's sheet.

use std::path::Path;

use namecard_chat::{CapturedImage, ScanPipeline};
use namecard_config::model::NamecardConfig;
use namecard_core::NamecardError;
use namecard_usage::UsageTracker;
use tracing::debug;

use crate::app::App;
use crate::render;

/// Run the `namecard scan <image>` command.
pub async fn run_scan(config: &NamecardConfig, image_path: &Path) -> Result<(), NamecardError> {
    let bytes = std::fs::read(image_path).map_err(|e| {
        NamecardError::Internal(format!("could not read {}: {e}", image_path.display()))
    })?;
    let filename = image_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "card.jpg".to_string());

    let image = CapturedImage { bytes, filename };
    run_capture(config, Capture::Image(image)).await
}

/// Run the `namecard add <text>` command.
pub async fn run_add(config: &NamecardConfig, text: &str) -> Result<(), NamecardError> {
    run_capture(config, Capture::Text(text.to_string())).await
}

enum Capture {
    Image(CapturedImage),
    Text(String),
}

async fn run_capture(config: &NamecardConfig, capture: Capture) -> Result<(), NamecardError> {
    let app = App::init(config).await?;
    let _session = app.require_session().await?;

    // Refresh counters (fail-open) and gate on the scan quota.
    let mut tracker = UsageTracker::restore(&config.limits, &app.db).await?;
    tracker.fetch(app.gateway.as_ref(), &app.db).await;
    if !tracker.can_scan() {
        return Err(tracker.scan_quota_error());
    }

    let mut pipeline = ScanPipeline::new(app.gateway.clone());
    let printed = pipeline.log().len();

    let extracted = match capture {
        Capture::Image(image) => pipeline.submit_image(image, false).await?,
        Capture::Text(text) => pipeline.submit_text(&text).await?,
    };

    if extracted.is_some() {
        tracker.record_scan(&app.db).await;
        let saved = pipeline
            .log()
            .turns()
            .filter(|t| t.contact().is_some())
            .last()
            .is_some_and(|t| t.is_saved());
        if saved {
            tracker.record_contact_saved(&app.db).await;
        }
        debug!(saved, "capture complete");
    }

    render::print_new_turns(pipeline.log(), printed);

    if let Some(remaining) = tracker.remaining_scans() {
        println!("\n{remaining} free scans remaining.");
    }
    Ok(())
}
