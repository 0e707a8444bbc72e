// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Namecard integration tests.
//!
//! Provides the mock gateway and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without a backend.
//!
//! # Components
//!
//! - [`MockGateway`] - Mock contact backend with scripted outcomes
//! - [`TestHarness`] - Full client stack (pipeline, tracker, state store)

pub mod harness;
pub mod mock_gateway;

pub use harness::TestHarness;
pub use mock_gateway::MockGateway;
