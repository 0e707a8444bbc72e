// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-tier quota tracking for the Namecard client.

pub mod tracker;

pub use tracker::UsageTracker;
