// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service wiring shared by every subcommand.
//!
//! Each invocation explicitly constructs its services (state store, HTTP
//! gateway) from configuration; nothing lives in ambient globals.

use std::sync::Arc;

use namecard_api::{AuthSession, HttpGateway};
use namecard_config::model::NamecardConfig;
use namecard_core::NamecardError;
use namecard_store::StateDb;
use tracing_subscriber::EnvFilter;

/// The dependency-injected service stack for one command invocation.
pub struct App {
    pub db: StateDb,
    pub gateway: Arc<HttpGateway>,
}

impl App {
    /// Open the state store and build the HTTP gateway from config.
    pub async fn init(config: &NamecardConfig) -> Result<Self, NamecardError> {
        let db = StateDb::open(&config.storage.database_path).await?;
        let gateway = Arc::new(HttpGateway::new(&config.api)?);
        Ok(Self { db, gateway })
    }

    /// Verify the session, trusting a cached identity when offline.
    ///
    /// Returns the checked session or `Unauthorized` when the user must
    /// sign in first.
    pub async fn require_session(&self) -> Result<AuthSession, NamecardError> {
        let mut session = AuthSession::restore(&self.db).await?;
        if session.check(self.gateway.as_ref(), &self.db).await? {
            Ok(session)
        } else {
            Err(NamecardError::Unauthorized)
        }
    }
}

/// Initialize tracing with the configured log level (env override wins).
pub fn init_tracing(config: &NamecardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
