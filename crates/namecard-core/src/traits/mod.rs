// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by concrete backends.

pub mod gateway;

pub use gateway::ContactGateway;
